// --- File: crates/barberbook_stripe/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{DepositIntentResponse, StripePaymentIntent};

#[utoipa::path(
    post,
    path = "/payments/deposit-intent", // Path relative to /api
    responses(
        (status = 200, description = "Deposit PaymentIntent created", body = DepositIntentResponse,
         example = json!({
             "payment_intent_id": "pi_3NXAbc123",
             "client_secret": "pi_3NXAbc123_secret_xyz",
             "amount": 500,
             "currency": "usd"
         })
        ),
        (status = 503, description = "Stripe service is disabled"),
        (status = 500, description = "Internal Server Error or Stripe API error")
    ),
    tag = "Payments"
)]
fn doc_create_deposit_intent_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_deposit_intent_handler),
    components(schemas(DepositIntentResponse, StripePaymentIntent)),
    tags(
        (name = "Payments", description = "Deposit payment API backed by Stripe")
    )
)]
pub struct StripeApiDoc;
