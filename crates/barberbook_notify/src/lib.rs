// --- File: crates/barberbook_notify/src/lib.rs ---

pub mod email;
pub mod error;
pub mod service;
pub mod sms;

// Re-export for main backend
pub use error::NotifyError;
pub use service::NotifyService;
