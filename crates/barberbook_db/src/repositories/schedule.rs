//! Repository for the weekly schedule
//!
//! The schedule is stored as a single JSON document so a save replaces the
//! whole week atomically.

use crate::error::DbError;
use barberbook_common::models::WeeklySchedule;

/// Repository for the shop's weekly opening hours.
pub trait ScheduleRepository {
    /// Initialize the database schema.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Load the stored weekly schedule.
    ///
    /// Returns the shop's default hours when no schedule has been saved yet.
    fn load(&self) -> impl std::future::Future<Output = Result<WeeklySchedule, DbError>> + Send;

    /// Replace the stored weekly schedule.
    ///
    /// All seven days are written in one statement; a failed save leaves the
    /// previous schedule untouched.
    fn save(
        &self,
        schedule: &WeeklySchedule,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;
}
