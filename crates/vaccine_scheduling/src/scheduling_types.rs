use chrono::NaiveDate;
use serde::Serialize;

/// Named vaccine stock as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VaccineStock {
    /// Unique vaccine name
    pub name: String,
    /// Doses currently in stock, never negative
    #[sqlx(rename = "doses")]
    pub available_doses: i32,
}

/// One caregiver-date unit of bookable capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AvailabilitySlot {
    /// Storage-assigned identifier, also used as the appointment id
    pub appointment_id: i64,
    /// Caregiver who published the slot
    pub caregiver_username: String,
    /// Day the slot is available on
    #[sqlx(rename = "slot_date")]
    pub date: NaiveDate,
    /// Vaccine bound to the slot once booked
    pub vaccine_name: Option<String>,
    /// Patient bound to the slot once booked
    pub patient_username: Option<String>,
}

impl AvailabilitySlot {
    /// A slot is open while neither a patient nor a vaccine is bound to it.
    pub fn is_open(&self) -> bool {
        self.vaccine_name.is_none() && self.patient_username.is_none()
    }
}

/// Result of a successful reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    /// Id of the booked slot
    pub appointment_id: i64,
    /// Caregiver reported for the booking
    pub caregiver_username: String,
}

/// Open caregivers on a date together with the current vaccine stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    /// The requested date
    pub date: NaiveDate,
    /// Caregivers with an open slot, one entry per slot, ascending by username
    pub caregivers: Vec<String>,
    /// All vaccines in stock, ascending by name
    pub vaccines: Vec<VaccineStock>,
}

/// Custom error type for inventory, availability and reservation operations
#[derive(thiserror::Error, Debug)]
pub enum SchedulingError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Input that does not follow `yyyy-mm-dd` or names no calendar day
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Dose count that would break the non-negative stock invariant
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A vaccine with this name is already in the inventory
    #[error("Vaccine {0} already exists")]
    VaccineExists(String),

    /// The requested vaccine is not in the inventory
    #[error("Vaccine {name} is not in the inventory")]
    VaccineNotFound {
        /// Name that was requested
        name: String,
        /// Names currently in the inventory
        inventory: Vec<String>,
    },

    /// No open slot exists on the requested date
    #[error("No caregiver is available")]
    NoAvailability,

    /// The vaccine has no doses left
    #[error("Vaccine {0} is out of stock")]
    OutOfStock(String),

    /// The slot does not exist or is already booked
    #[error("Appointment {0} is not open")]
    SlotUnavailable(i64),
}
