// --- File: crates/barberbook_stripe/src/routes.rs ---

use crate::handlers::{create_deposit_intent_handler, StripeState};
use axum::{routing::post, Router};
use barberbook_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the Stripe feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let stripe_state = Arc::new(StripeState { config });

    Router::new()
        .route(
            "/payments/deposit-intent",
            post(create_deposit_intent_handler),
        )
        .with_state(stripe_state)
}
