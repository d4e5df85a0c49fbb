// --- File: crates/barberbook_stripe/src/service.rs ---
use crate::error::StripeError;
use crate::logic::{create_payment_intent, retrieve_payment_intent};
use barberbook_common::services::{BoxFuture, PaymentIntentResult, PaymentService};
use barberbook_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;

/// Stripe payment service implementation
pub struct StripePaymentService {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
}

impl StripePaymentService {
    /// Create a new Stripe payment service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

fn to_result(intent: crate::logic::StripePaymentIntent) -> PaymentIntentResult {
    PaymentIntentResult {
        id: intent.id,
        status: intent.status,
        amount: intent.amount,
        currency: intent.currency,
        client_secret: intent.client_secret,
    }
}

impl PaymentService for StripePaymentService {
    type Error = StripeError;

    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
        metadata: Option<Value>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let currency = currency.to_string();
        let description = description.map(|s| s.to_string());

        Box::pin(async move {
            let intent =
                create_payment_intent(amount, &currency, description.as_deref(), metadata).await?;
            Ok(to_result(intent))
        })
    }

    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let payment_intent_id = payment_intent_id.to_string();
        Box::pin(async move {
            let intent = retrieve_payment_intent(&payment_intent_id).await?;
            Ok(to_result(intent))
        })
    }
}
