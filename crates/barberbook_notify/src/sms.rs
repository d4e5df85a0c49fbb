// --- File: crates/barberbook_notify/src/sms.rs ---
//! Booking SMS via the Twilio Messages API.
//!
//! Credentials come from the TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN
//! environment variables; the sending number lives in config.

use crate::error::NotifyError;
use barberbook_common::HTTP_CLIENT;
use serde::Deserialize;
use std::env;
use tracing::{error, info};

#[derive(Deserialize, Debug)]
pub struct TwilioMessageResponse {
    pub sid: String,
    pub status: Option<String>,
}

/// Send one SMS through Twilio.
pub async fn send_sms(from: &str, to: &str, body: &str) -> Result<TwilioMessageResponse, NotifyError> {
    let account_sid = env::var("TWILIO_ACCOUNT_SID").map_err(|_| NotifyError::ConfigError)?;
    let auth_token = env::var("TWILIO_AUTH_TOKEN").map_err(|_| NotifyError::ConfigError)?;

    let url = format!(
        "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
        account_sid
    );

    let params = [("To", to), ("From", from), ("Body", body)];

    info!("Sending SMS to {}", to);
    let response = HTTP_CLIENT
        .post(&url)
        .basic_auth(&account_sid, Some(&auth_token))
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await.unwrap_or_default();

    if !status.is_success() {
        // Bubble up the Twilio JSON error so failures are debuggable
        error!("Twilio returned {}: {}", status, body_text);
        return Err(NotifyError::ApiError {
            status_code: status.as_u16(),
            message: body_text,
        });
    }

    let message: TwilioMessageResponse = serde_json::from_str(&body_text).map_err(|e| {
        NotifyError::ApiError {
            status_code: status.as_u16(),
            message: format!("Unexpected Twilio response: {e}"),
        }
    })?;

    info!("SMS sent to {}: {}", to, message.sid);
    Ok(message)
}
