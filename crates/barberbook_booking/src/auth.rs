// --- File: crates/barberbook_booking/src/auth.rs ---

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use barberbook_config::AppConfig;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tracing::warn;

/// State for the admin auth middleware; only needs the config for the secret.
#[derive(Clone)]
pub struct AdminAuthState {
    pub config: Arc<AppConfig>,
}

const ADMIN_AUTH_HEADER: &str = "X-Admin-Auth-Secret";

/// Axum middleware guarding the admin routes.
///
/// Checks a shared secret in the `X-Admin-Auth-Secret` header against the
/// configured value using a constant-time comparison. This answers "is this
/// caller an admin" and nothing more.
pub async fn admin_auth_middleware(
    State(auth_state): State<Arc<AdminAuthState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let expected_secret = match auth_state
        .config
        .admin
        .as_ref()
        .and_then(|admin| admin.shared_secret.clone())
    {
        Some(secret) => secret,
        None => {
            warn!("Admin shared secret not configured; rejecting admin request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error for admin auth.".to_string(),
            )
                .into_response();
        }
    };

    let provided_secret = req
        .headers()
        .get(ADMIN_AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided_secret {
        Some(provided) => {
            if constant_time_eq(provided.as_bytes(), expected_secret.as_bytes()) {
                next.run(req).await
            } else {
                warn!("Admin request with invalid secret");
                (
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized: Invalid credentials.".to_string(),
                )
                    .into_response()
            }
        }
        None => (
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: Missing {} header.", ADMIN_AUTH_HEADER),
        )
            .into_response(),
    }
}
