// --- File: crates/barberbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod booking;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use error::BookingError;
