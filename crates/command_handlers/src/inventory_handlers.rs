use vaccine_scheduling::SchedulingError;

use crate::context::HandlerContext;
use crate::error::CommandError;
use crate::session::Session;

const ADD_FAILED: &str = "Error occurred when adding doses";

/// Handles `add_doses <vaccine> <number>`
pub async fn add_doses(
    ctx: &HandlerContext,
    session: &Session,
    args: &[&str],
) -> Result<String, CommandError> {
    if session.caregiver().is_none() {
        return Err(CommandError::Auth(
            "Please login as a caregiver first!".to_string(),
        ));
    }

    let [vaccine_name, doses] = args else {
        return Err(CommandError::Validation("Please try again!".to_string()));
    };
    let doses: i32 = doses
        .parse()
        .map_err(|_| CommandError::Validation("Please try again!".to_string()))?;

    let stock = ctx
        .reservation_service()
        .add_doses(vaccine_name, doses)
        .await
        .map_err(|e| match e {
            SchedulingError::InvalidArgument(_) | SchedulingError::VaccineExists(_) => {
                CommandError::Validation(ADD_FAILED.to_string())
            }
            other => CommandError::storage(ADD_FAILED, other),
        })?;

    log::debug!("{} now has {} doses", stock.name, stock.available_doses);
    Ok("Doses updated!".to_string())
}
