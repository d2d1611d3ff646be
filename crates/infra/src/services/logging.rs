use super::{IEmailDelivery, IPushDelivery, ISmsDelivery};
use exam_notifier_domain::{EmailTemplate, PushData, PushProvider, SmsTemplate, TemplateVars};
use tracing::info;

/// Delivery used for channels without provider credentials. Messages are
/// only logged and nothing is retained.
#[derive(Debug, Default)]
pub struct LoggingDelivery {}

impl LoggingDelivery {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl IEmailDelivery for LoggingDelivery {
    async fn send(
        &self,
        address: &str,
        subject: &str,
        template: EmailTemplate,
        _vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        info!(
            "[No email provider] Email to: {} with subject: {} and template: {:?}",
            address, subject, template
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl ISmsDelivery for LoggingDelivery {
    async fn send(
        &self,
        phone: &str,
        template: SmsTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        info!("[No sms provider] SMS to: {}: {}", phone, template.render(vars));
        Ok(())
    }
}

#[async_trait::async_trait]
impl IPushDelivery for LoggingDelivery {
    fn supports(&self, _provider: PushProvider) -> bool {
        true
    }

    async fn send(
        &self,
        provider: PushProvider,
        tokens: &[String],
        title: &str,
        _body: &str,
        _data: &PushData,
    ) -> anyhow::Result<()> {
        info!(
            "[No push provider] Push through {} to {} devices: {}",
            provider,
            tokens.len(),
            title
        );
        Ok(())
    }
}
