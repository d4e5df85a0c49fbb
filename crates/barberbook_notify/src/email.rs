// --- File: crates/barberbook_notify/src/email.rs ---
//! Confirmation emails via the SendGrid v3 API.
//!
//! The API key comes from the SENDGRID_API_KEY environment variable; only the
//! sender address lives in config.

use crate::error::NotifyError;
use barberbook_common::HTTP_CLIENT;
use serde_json::json;
use std::env;
use tracing::{error, info};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Send one email through SendGrid.
pub async fn send_email(
    from_email: &str,
    to: &str,
    subject: &str,
    body: &str,
    is_html: bool,
) -> Result<(), NotifyError> {
    let api_key = env::var("SENDGRID_API_KEY").map_err(|_| NotifyError::ConfigError)?;

    let content_type = if is_html { "text/html" } else { "text/plain" };
    let payload = json!({
        "personalizations": [{ "to": [{ "email": to }] }],
        "from": { "email": from_email },
        "subject": subject,
        "content": [{ "type": content_type, "value": body }],
    });

    info!("Sending email to {}: {}", to, subject);
    let response = HTTP_CLIENT
        .post(SENDGRID_SEND_URL)
        .bearer_auth(api_key)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        error!("SendGrid returned {}: {}", status, body_text);
        return Err(NotifyError::ApiError {
            status_code: status.as_u16(),
            message: body_text,
        });
    }

    info!("Email sent to {}", to);
    Ok(())
}
