use vaccine_scheduling::{AvailabilitySlot, SchedulingError, parse_date};

use crate::context::HandlerContext;
use crate::error::CommandError;
use crate::session::Session;

const LOGIN_FIRST: &str = "Please login first!";
const DATE_FORMAT: &str = "Please print date in the format: yyyy-mm-dd";
const TRY_AGAIN: &str = "Please try again!";

/// Handles `search_caregiver_schedule <date>`
pub async fn search_caregiver_schedule(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    if !session.is_logged_in() {
        return Err(CommandError::Auth(LOGIN_FIRST.to_string()));
    }

    let [date] = args else {
        return Err(CommandError::Validation(
            "Enter a valid date, please try again!".to_string(),
        ));
    };
    let date = parse_date(date).map_err(|_| CommandError::Validation(DATE_FORMAT.to_string()))?;

    let view = ctx
        .reservation_service()
        .schedule_for(date)
        .await
        .map_err(|e| CommandError::storage(TRY_AGAIN, e))?;

    if view.caregivers.is_empty() {
        return Err(CommandError::NotFound(
            "No availabilities found on this date!".to_string(),
        ));
    }

    let mut reply = format!(
        "Caregivers available on {}: {}",
        view.date,
        view.caregivers.join(" ")
    );
    for vaccine in &view.vaccines {
        reply.push_str(&format!("\n{}: {} doses", vaccine.name, vaccine.available_doses));
    }

    Ok(reply)
}

/// Handles `reserve <date> <vaccine>`
pub async fn reserve(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    if session.caregiver().is_some() {
        return Err(CommandError::Auth("Please login as a patient!".to_string()));
    }
    let Some(patient) = session.patient() else {
        return Err(CommandError::Auth(LOGIN_FIRST.to_string()));
    };

    let [date, vaccine_name] = args else {
        return Err(CommandError::Validation(
            "Please enter both date and vaccine!".to_string(),
        ));
    };
    let date = parse_date(date).map_err(|_| CommandError::Validation(DATE_FORMAT.to_string()))?;

    let reservation = ctx
        .reservation_service()
        .reserve(date, vaccine_name, &patient.username)
        .await
        .map_err(|e| match e {
            SchedulingError::VaccineNotFound { name, inventory } => CommandError::NotFound(format!(
                "{} is not in our inventory. We currently have these vaccines in our inventory: {}",
                name,
                inventory.join(" ")
            )),
            SchedulingError::NoAvailability => {
                CommandError::NotFound("No caregiver is available!".to_string())
            }
            SchedulingError::OutOfStock(_) | SchedulingError::InvalidArgument(_) => {
                CommandError::State("Not enough available doses!".to_string())
            }
            SchedulingError::SlotUnavailable(_) => CommandError::State(TRY_AGAIN.to_string()),
            other => CommandError::storage(TRY_AGAIN, other),
        })?;

    Ok(format!(
        "Successfully scheduled:\nAppointment ID: {}\nCaregiver username: {}",
        reservation.appointment_id, reservation.caregiver_username
    ))
}

/// Handles `upload_availability <date>`
pub async fn upload_availability(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    let Some(caregiver) = session.caregiver() else {
        return Err(CommandError::Auth(
            "Please login as a caregiver first!".to_string(),
        ));
    };

    let [date] = args else {
        return Err(CommandError::Validation(TRY_AGAIN.to_string()));
    };
    let date = parse_date(date)
        .map_err(|_| CommandError::Validation("Please enter a valid date!".to_string()))?;

    ctx.reservation_service()
        .ledger()
        .publish(&caregiver.username, date)
        .await
        .map_err(|e| CommandError::storage("Error occurred when uploading availability", e))?;

    Ok("Availability uploaded!".to_string())
}

/// Handles `cancel <appointment_id>`
///
/// Any logged-in account may cancel any appointment id, and an id that does
/// not exist is still reported as cancelled.
pub async fn cancel(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    if !session.is_logged_in() {
        return Err(CommandError::Auth(LOGIN_FIRST.to_string()));
    }

    let [appointment_id] = args else {
        return Err(CommandError::Validation(
            "Please enter the id of the appointment you want cancelled!".to_string(),
        ));
    };
    let appointment_id: i64 = appointment_id.parse().map_err(|_| {
        CommandError::Validation("Please enter a valid appointment id!".to_string())
    })?;

    ctx.reservation_service()
        .cancel(appointment_id)
        .await
        .map_err(|e| CommandError::storage(TRY_AGAIN, e))?;

    Ok("Successfully cancelled".to_string())
}

/// Handles `show_appointments`
pub async fn show_appointments(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    if !session.is_logged_in() {
        return Err(CommandError::Auth(LOGIN_FIRST.to_string()));
    }
    if !args.is_empty() {
        return Err(CommandError::Validation(TRY_AGAIN.to_string()));
    }

    let service = ctx.reservation_service();
    let ledger = service.ledger();

    let lines: Vec<String> = match session {
        Session::Caregiver(account) => ledger
            .list_for_caregiver(&account.username)
            .await
            .map_err(|e| CommandError::storage(TRY_AGAIN, e))?
            .iter()
            .map(|slot| {
                format!(
                    "Appointment ID: {}, Vaccine Name: {}, Date: {}, Patient Name: {}",
                    slot.appointment_id,
                    or_none(&slot.vaccine_name),
                    slot.date,
                    or_none(&slot.patient_username)
                )
            })
            .collect(),
        Session::Patient(account) => ledger
            .list_for_patient(&account.username)
            .await
            .map_err(|e| CommandError::storage(TRY_AGAIN, e))?
            .iter()
            .map(patient_line)
            .collect(),
        Session::LoggedOut => Vec::new(),
    };

    if lines.is_empty() {
        return Ok("You have no appointments scheduled!".to_string());
    }

    Ok(lines.join("\n"))
}

fn patient_line(slot: &AvailabilitySlot) -> String {
    format!(
        "Appointment ID: {}, Vaccine Name: {}, Date: {}, Caregiver username: {}",
        slot.appointment_id,
        or_none(&slot.vaccine_name),
        slot.date,
        slot.caregiver_username
    )
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}
