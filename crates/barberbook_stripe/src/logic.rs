// --- File: crates/barberbook_stripe/src/logic.rs ---
//! Calls against the Stripe PaymentIntents API.
//!
//! The booking flow collects the deposit through a PaymentIntent: the
//! frontend asks for an intent, confirms it with Stripe Elements, and hands
//! the intent id back with the booking request. The secret key comes from the
//! STRIPE_SECRET_KEY environment variable, never from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use tracing::info;

use crate::error::StripeError;
use barberbook_common::HTTP_CLIENT;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// A PaymentIntent as Stripe returns it, trimmed to the fields we use.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StripePaymentIntent {
    #[cfg_attr(feature = "openapi", schema(example = "pi_3NXAbc123"))]
    pub id: String,
    /// e.g. "requires_payment_method", "processing", "succeeded"
    #[cfg_attr(feature = "openapi", schema(example = "succeeded"))]
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub client_secret: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
}

/// Response to the frontend after creating a deposit intent.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DepositIntentResponse {
    #[cfg_attr(feature = "openapi", schema(example = "pi_3NXAbc123"))]
    pub payment_intent_id: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "pi_3NXAbc123_secret_xyz")
    )]
    pub client_secret: String,
    #[cfg_attr(feature = "openapi", schema(example = 500))]
    pub amount: i64,
    #[cfg_attr(feature = "openapi", schema(example = "usd"))]
    pub currency: String,
}

fn stripe_secret_key() -> Result<String, StripeError> {
    env::var("STRIPE_SECRET_KEY").map_err(|_| StripeError::ConfigError)
}

fn api_error_from_body(status: u16, body_text: String) -> StripeError {
    let message = match serde_json::from_str::<serde_json::Value>(&body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or(&body_text)
            .to_string(),
        Err(_) => body_text,
    };
    StripeError::ApiError {
        status_code: status,
        message,
    }
}

/// Creates a PaymentIntent for the given amount.
pub async fn create_payment_intent(
    amount: i64,
    currency: &str,
    description: Option<&str>,
    metadata: Option<serde_json::Value>,
) -> Result<StripePaymentIntent, StripeError> {
    info!(
        "[Stripe Logic] Creating PaymentIntent for {} {}",
        amount, currency
    );

    let stripe_secret_key = stripe_secret_key()?;

    let mut form_body: Vec<(String, String)> = vec![
        ("amount".to_string(), amount.to_string()),
        ("currency".to_string(), currency.to_lowercase()),
        (
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ),
    ];
    if let Some(description) = description {
        form_body.push(("description".to_string(), description.to_string()));
    }
    if let Some(serde_json::Value::Object(map)) = metadata {
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            form_body.push((format!("metadata[{key}]"), value));
        }
    }

    let response = HTTP_CLIENT
        .post(PAYMENT_INTENTS_URL)
        .basic_auth(stripe_secret_key, None::<&str>)
        .form(&form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        let intent: StripePaymentIntent = serde_json::from_str(&body_text)?;
        info!("[Stripe Logic] PaymentIntent {} created", intent.id);
        Ok(intent)
    } else {
        info!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}",
            status
        );
        Err(api_error_from_body(status.as_u16(), body_text))
    }
}

/// Retrieves the current state of a PaymentIntent.
///
/// The booking handler uses this to check that the deposit referenced by an
/// incoming booking has actually succeeded for the expected amount.
pub async fn retrieve_payment_intent(
    payment_intent_id: &str,
) -> Result<StripePaymentIntent, StripeError> {
    info!(
        "[Stripe Logic] Retrieving PaymentIntent {}",
        payment_intent_id
    );

    let stripe_secret_key = stripe_secret_key()?;
    let api_url = format!("{PAYMENT_INTENTS_URL}/{payment_intent_id}");

    let response = HTTP_CLIENT
        .get(&api_url)
        .basic_auth(stripe_secret_key, None::<&str>)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        let intent: StripePaymentIntent = serde_json::from_str(&body_text)?;
        Ok(intent)
    } else {
        Err(api_error_from_body(status.as_u16(), body_text))
    }
}
