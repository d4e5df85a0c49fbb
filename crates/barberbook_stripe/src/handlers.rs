// --- File: crates/barberbook_stripe/src/handlers.rs ---
use crate::logic::{create_payment_intent, DepositIntentResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use barberbook_common::HttpStatusCode;
use barberbook_config::AppConfig;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

// --- State for Stripe Handlers ---
// Only needs AppConfig; the reqwest client is static in barberbook_common.
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
}

/// Axum handler creating a deposit PaymentIntent.
///
/// The amount always comes from server config, never from the client, so a
/// tampered request cannot shrink the deposit.
#[axum::debug_handler]
pub async fn create_deposit_intent_handler(
    State(state): State<Arc<StripeState>>,
) -> Result<Json<DepositIntentResponse>, (StatusCode, String)> {
    if !state.config.use_stripe {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Stripe service is disabled.".to_string(),
        ));
    }

    let booking_cfg = &state.config.booking;
    let description = state
        .config
        .stripe
        .as_ref()
        .and_then(|cfg| cfg.product_name.clone())
        .unwrap_or_else(|| "Barbershop booking deposit".to_string());
    let metadata = json!({ "purpose": "booking_deposit" });

    let intent = create_payment_intent(
        booking_cfg.deposit_cents,
        &booking_cfg.currency,
        Some(&description),
        Some(metadata),
    )
    .await
    .map_err(|e| {
        error!("Failed to create deposit PaymentIntent: {}", e);
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, e.to_string())
    })?;

    let client_secret = intent.client_secret.ok_or_else(|| {
        error!("Stripe response missing client_secret for {}", intent.id);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Stripe response missing client secret".to_string(),
        )
    })?;

    Ok(Json(DepositIntentResponse {
        payment_intent_id: intent.id,
        client_secret,
        amount: intent.amount,
        currency: intent.currency,
    }))
}
