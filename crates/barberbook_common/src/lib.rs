// --- File: crates/barberbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared domain models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::HttpStatusCode;

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
