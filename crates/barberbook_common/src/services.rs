// --- File: crates/barberbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Trait definitions for the payment and notification collaborators used by
//! the booking flow. They allow dependency injection and easier testing by
//! decoupling the booking logic from concrete providers.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for payment service operations.
///
/// The booking flow only needs to create a deposit payment intent up front
/// and to confirm the state of an intent when a booking references it.
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a payment intent.
    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
        metadata: Option<serde_json::Value>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error>;

    /// Retrieve the current state of a payment intent.
    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error>;
}

/// A trait for notification service operations.
///
/// Notifications are best-effort: callers log failures and never let them
/// affect the booking outcome.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;

    /// Send an SMS notification.
    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// A factory for creating service instances.
///
/// The backend binary implements this to hand the booking routes whichever
/// collaborators are compiled in and enabled by runtime config.
pub trait ServiceFactory: Send + Sync {
    /// Get a payment service instance.
    fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>>;

    /// Get a notification service instance.
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>>;
}

/// Represents the result of a payment intent operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResult {
    /// The ID of the payment intent.
    pub id: String,
    /// The status of the payment intent.
    pub status: String,
    /// The amount of the payment intent.
    pub amount: i64,
    /// The currency of the payment intent.
    pub currency: String,
    /// The client secret for the payment intent.
    pub client_secret: Option<String>,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// The ID of the notification.
    pub id: String,
    /// The status of the notification.
    pub status: String,
}
