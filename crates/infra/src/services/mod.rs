mod brevo;
mod bulksms;
mod inmemory;
mod logging;
mod onesignal;

pub use brevo::BrevoEmailDelivery;
pub use bulksms::BulkSmsDelivery;
pub use inmemory::{DeliveredMessage, InMemoryDelivery};
pub use logging::LoggingDelivery;
pub use onesignal::OneSignalPushDelivery;

use crate::Config;
use exam_notifier_domain::{EmailTemplate, PushData, PushProvider, SmsTemplate, TemplateVars};
use std::sync::Arc;

#[async_trait::async_trait]
pub trait IEmailDelivery: Send + Sync {
    async fn send(
        &self,
        address: &str,
        subject: &str,
        template: EmailTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait ISmsDelivery: Send + Sync {
    async fn send(
        &self,
        phone: &str,
        template: SmsTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait IPushDelivery: Send + Sync {
    /// Whether this delivery is able to reach tokens issued by `provider`
    fn supports(&self, provider: PushProvider) -> bool;

    async fn send(
        &self,
        provider: PushProvider,
        tokens: &[String],
        title: &str,
        body: &str,
        data: &PushData,
    ) -> anyhow::Result<()>;
}

/// The outgoing channels a reminder pass can deliver through
#[derive(Clone)]
pub struct Delivery {
    pub email: Arc<dyn IEmailDelivery>,
    pub sms: Arc<dyn ISmsDelivery>,
    pub push: Arc<dyn IPushDelivery>,
}

impl Delivery {
    /// Uses the real provider for every channel that has credentials and
    /// a log-only delivery for the rest
    pub fn from_config(config: &Config) -> Self {
        let fallback = Arc::new(LoggingDelivery::new());
        let email: Arc<dyn IEmailDelivery> = match &config.brevo {
            Some(brevo) => Arc::new(BrevoEmailDelivery::new(brevo.clone())),
            None => fallback.clone(),
        };
        let sms: Arc<dyn ISmsDelivery> = match &config.bulksms {
            Some(bulksms) => Arc::new(BulkSmsDelivery::new(bulksms.clone())),
            None => fallback.clone(),
        };
        let push: Arc<dyn IPushDelivery> = match &config.onesignal {
            Some(onesignal) => Arc::new(OneSignalPushDelivery::new(onesignal.clone())),
            None => fallback,
        };
        Self { email, sms, push }
    }

    pub fn create_inmemory() -> Self {
        Self::single(Arc::new(InMemoryDelivery::new()))
    }

    /// Delivers every channel through the same implementation
    pub fn single<T>(delivery: Arc<T>) -> Self
    where
        T: IEmailDelivery + ISmsDelivery + IPushDelivery + 'static,
    {
        Self {
            email: delivery.clone(),
            sms: delivery.clone(),
            push: delivery,
        }
    }
}
