//! Repository for appointments
//!
//! The appointments table carries the core scheduling invariant: a partial
//! unique index over (date, time) restricted to confirmed rows makes the
//! conditional insert the single authority on slot ownership. Two concurrent
//! inserts for the same slot cannot both succeed; the loser gets
//! [`DbError::UniqueViolation`]. Cancelled rows fall outside the index, so a
//! freed slot can be rebooked while history is preserved.

use crate::error::DbError;
use barberbook_common::models::Appointment;
use chrono::{DateTime, NaiveDate, Utc};

/// Repository for booked appointments.
pub trait AppointmentRepository {
    /// Initialize the database schema, including the confirmed-slot unique index.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a confirmed appointment.
    ///
    /// Fails with [`DbError::UniqueViolation`] when another confirmed
    /// appointment already holds the same (date, time) slot.
    fn insert_confirmed(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Look up an appointment by id.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, DbError>> + Send;

    /// The confirmed appointment holding a slot, if any.
    fn find_confirmed_at(
        &self,
        date: NaiveDate,
        time: &str,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, DbError>> + Send;

    /// Slot labels with a confirmed appointment on the given date.
    fn booked_times_for_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<String>, DbError>> + Send;

    /// All appointments on or after the given date, ordered by date.
    fn list_from(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, DbError>> + Send;

    /// Mark a confirmed appointment cancelled.
    ///
    /// Returns `false` when the appointment was not confirmed (already
    /// cancelled or missing); the row is never deleted.
    fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Move a confirmed appointment to a new slot.
    ///
    /// Returns `false` when the appointment was not confirmed. Fails with
    /// [`DbError::UniqueViolation`] when the target slot is taken.
    fn update_slot(
        &self,
        id: &str,
        new_date: NaiveDate,
        new_time: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
