// --- File: crates/barberbook_common/src/http/client.rs ---
//! Shared HTTP client.
//!
//! External providers (Stripe, SendGrid, Twilio) are called through a single
//! lazily-initialized reqwest client so connection pools are reused.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// The shared HTTP client with a 30 second request timeout.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| create_client(Duration::from_secs(30)));

/// Create a new HTTP client with a custom timeout.
pub fn create_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
