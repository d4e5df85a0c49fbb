//! Repository for blocked dates
//!
//! Blocked dates behave as a set keyed by date: blocking an already-blocked
//! date is a no-op and unblocking removes every entry for that date.

use crate::error::DbError;
use barberbook_common::models::BlockedDate;
use chrono::NaiveDate;

/// Repository for dates the shop is closed outside the weekly schedule.
pub trait BlockedDateRepository {
    /// Initialize the database schema.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Block a date. Returns the stored entry.
    fn add(
        &self,
        blocked: BlockedDate,
    ) -> impl std::future::Future<Output = Result<BlockedDate, DbError>> + Send;

    /// Look up a blocked date.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<BlockedDate>, DbError>> + Send;

    /// All blocked dates, ordered by date.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<BlockedDate>, DbError>> + Send;

    /// Unblock a date. Returns `true` if anything was removed.
    fn remove_by_date(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
