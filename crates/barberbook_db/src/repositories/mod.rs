//! Repositories for the Barberbook data model
//!
//! Each store is defined as a trait plus a SQL implementation so the booking
//! logic can be tested against fakes without a live database.

pub mod appointments;
pub mod appointments_sql;
pub mod blocked_dates;
pub mod blocked_dates_sql;
pub mod schedule;
pub mod schedule_sql;

pub use appointments::AppointmentRepository;
pub use appointments_sql::SqlAppointmentRepository;
pub use blocked_dates::BlockedDateRepository;
pub use blocked_dates_sql::SqlBlockedDateRepository;
pub use schedule::ScheduleRepository;
pub use schedule_sql::SqlScheduleRepository;
