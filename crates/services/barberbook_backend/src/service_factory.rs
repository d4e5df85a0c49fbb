// --- File: crates/services/barberbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the payment and notification services the booking routes depend on,
//! based on compiled features and runtime config flags. Concrete services keep
//! their own error types; thin wrappers box them into [`BoxedError`] so the
//! booking crate only sees one object-safe trait shape.

use barberbook_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)]
use {
    barberbook_common::services::{
        BoxFuture, BoxedError, NotificationResult, NotificationService, PaymentIntentResult,
        PaymentService, ServiceFactory,
    },
    tracing::info,
};

#[cfg(feature = "stripe")]
use barberbook_stripe::StripePaymentService;

#[cfg(feature = "notify")]
use barberbook_notify::NotifyService;

/// Service factory for the backend binary.
pub struct BarberbookServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "stripe")]
    payment_service: Option<Arc<dyn PaymentService<Error = BoxedError>>>,
    #[cfg(feature = "notify")]
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

#[cfg(feature = "stripe")]
struct BoxedPaymentService {
    inner: StripePaymentService,
}

#[cfg(feature = "stripe")]
impl PaymentService for BoxedPaymentService {
    type Error = BoxedError;

    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
        metadata: Option<serde_json::Value>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let currency = currency.to_string();
        let description = description.map(|s| s.to_string());
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_payment_intent(amount, &currency, description.as_deref(), metadata)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let payment_intent_id = payment_intent_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .confirm_payment_intent(&payment_intent_id)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

#[cfg(feature = "notify")]
struct BoxedNotificationService {
    inner: NotifyService,
}

#[cfg(feature = "notify")]
impl NotificationService for BoxedNotificationService {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_email(&to, &subject, &body, is_html)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_sms(&to, &body)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

impl BarberbookServiceFactory {
    /// Create a new service factory.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "stripe")]
            payment_service: None,
            #[cfg(feature = "notify")]
            notification_service: None,
        };

        #[cfg(feature = "stripe")]
        {
            if config.use_stripe {
                info!("Initializing Stripe payment service");
                let service = StripePaymentService::new(config.clone());
                factory.payment_service =
                    Some(Arc::new(BoxedPaymentService { inner: service }));
            } else {
                info!("Stripe feature compiled, but disabled via runtime config");
            }
        }

        #[cfg(feature = "notify")]
        {
            if config.use_notify && config.notify.is_some() {
                info!("Initializing notification service");
                let service = NotifyService::new(config.clone());
                factory.notification_service =
                    Some(Arc::new(BoxedNotificationService { inner: service }));
            } else {
                info!("Notify feature compiled, but disabled via runtime config or missing notify config section");
            }
        }

        factory
    }
}

impl ServiceFactory for BarberbookServiceFactory {
    fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>> {
        #[cfg(feature = "stripe")]
        {
            if let Some(service) = self.payment_service.clone() {
                return Some(service);
            }
        }

        None
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        #[cfg(feature = "notify")]
        {
            if let Some(service) = self.notification_service.clone() {
                return Some(service);
            }
        }

        None
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Mock service factory for testing; hands out no services.
    pub struct MockServiceFactory;

    impl Default for MockServiceFactory {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockServiceFactory {
        pub fn new() -> Self {
            Self
        }
    }

    impl ServiceFactory for MockServiceFactory {
        fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>> {
            None
        }

        fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
            None
        }
    }

    #[test]
    fn mock_factory_hands_out_no_services() {
        let factory = MockServiceFactory::new();
        assert!(factory.payment_service().is_none());
        assert!(factory.notification_service().is_none());
    }
}
