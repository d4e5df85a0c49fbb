// --- File: crates/barberbook_booking/src/error.rs ---

use barberbook_common::error::HttpStatusCode;
use barberbook_db::DbError;
use thiserror::Error;

/// Errors surfaced by the booking operations.
#[derive(Error, Debug)]
pub enum BookingError {
    /// The request is malformed or refers to a slot that cannot be booked.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another confirmed appointment already holds the requested slot.
    #[error("Requested time slot is no longer available")]
    SlotAlreadyBooked,

    /// The referenced appointment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached; the caller should retry later.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::Validation(_) => 400,
            BookingError::SlotAlreadyBooked => 409,
            BookingError::NotFound(_) => 404,
            BookingError::PersistenceUnavailable(_) => 503,
        }
    }
}

impl From<DbError> for BookingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation => BookingError::SlotAlreadyBooked,
            DbError::Unavailable(msg) | DbError::PoolError(msg) => {
                BookingError::PersistenceUnavailable(msg)
            }
            other => BookingError::PersistenceUnavailable(other.to_string()),
        }
    }
}
