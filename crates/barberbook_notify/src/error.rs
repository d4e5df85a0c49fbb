// --- File: crates/barberbook_notify/src/error.rs ---
use barberbook_common::HttpStatusCode;
use thiserror::Error;

/// Notification-specific error types.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error occurred during a provider API request
    #[error("Notification API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the provider API
    #[error("Notification API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete notification configuration
    #[error("Notification configuration missing or incomplete")]
    ConfigError,
}

impl HttpStatusCode for NotifyError {
    fn status_code(&self) -> u16 {
        match self {
            NotifyError::RequestError(_) => 502,
            NotifyError::ApiError { status_code, .. } => *status_code,
            NotifyError::ConfigError => 500,
        }
    }
}
