//! SQLite persistence for Barberbook
//!
//! Provides a pooled database client plus one repository per store: the
//! weekly schedule, blocked dates and appointments. Queries are plain runtime
//! SQL; row decoding happens in the repositories so the rest of the
//! application only sees domain types.

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::{
    AppointmentRepository, BlockedDateRepository, ScheduleRepository, SqlAppointmentRepository,
    SqlBlockedDateRepository, SqlScheduleRepository,
};
