// --- File: crates/barberbook_notify/src/service.rs ---
use crate::email;
use crate::error::NotifyError;
use crate::sms;
use barberbook_common::services::{BoxFuture, NotificationResult, NotificationService};
use barberbook_config::AppConfig;
use std::sync::Arc;
use uuid::Uuid;

/// Notification service backed by SendGrid for email and Twilio for SMS.
pub struct NotifyService {
    config: Arc<AppConfig>,
}

impl NotifyService {
    /// Create a new notification service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl NotificationService for NotifyService {
    type Error = NotifyError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        Box::pin(async move {
            let from_email = self
                .config
                .notify
                .as_ref()
                .map(|cfg| cfg.from_email.clone())
                .ok_or(NotifyError::ConfigError)?;

            email::send_email(&from_email, &to, &subject, &body, is_html).await?;
            Ok(NotificationResult {
                id: Uuid::new_v4().to_string(),
                status: "sent".to_string(),
            })
        })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();

        Box::pin(async move {
            let from = self
                .config
                .notify
                .as_ref()
                .and_then(|cfg| cfg.sms_from.clone())
                .ok_or(NotifyError::ConfigError)?;

            let message = sms::send_sms(&from, &to, &body).await?;
            Ok(NotificationResult {
                id: message.sid,
                status: message.status.unwrap_or_else(|| "queued".to_string()),
            })
        })
    }
}
