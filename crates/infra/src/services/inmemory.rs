use super::{IEmailDelivery, IPushDelivery, ISmsDelivery};
use exam_notifier_domain::{EmailTemplate, PushData, PushProvider, SmsTemplate, TemplateVars};
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveredMessage {
    Email {
        address: String,
        subject: String,
        template: EmailTemplate,
        vars: TemplateVars,
    },
    Sms {
        phone: String,
        text: String,
    },
    Push {
        provider: PushProvider,
        tokens: Vec<String>,
        title: String,
        body: String,
        data: PushData,
    },
}

/// Delivery of the in-memory context. Messages are logged and kept in
/// memory so they can be inspected.
pub struct InMemoryDelivery {
    messages: Mutex<Vec<DeliveredMessage>>,
}

impl InMemoryDelivery {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<DeliveredMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn record(&self, message: DeliveredMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

impl Default for InMemoryDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailDelivery for InMemoryDelivery {
    async fn send(
        &self,
        address: &str,
        subject: &str,
        template: EmailTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        info!(
            "[In-memory delivery] Email to: {} with subject: {} and template: {:?}",
            address, subject, template
        );
        self.record(DeliveredMessage::Email {
            address: address.to_string(),
            subject: subject.to_string(),
            template,
            vars: vars.clone(),
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl ISmsDelivery for InMemoryDelivery {
    async fn send(
        &self,
        phone: &str,
        template: SmsTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        let text = template.render(vars);
        info!("[In-memory delivery] SMS to: {}: {}", phone, text);
        self.record(DeliveredMessage::Sms {
            phone: phone.to_string(),
            text,
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl IPushDelivery for InMemoryDelivery {
    fn supports(&self, _provider: PushProvider) -> bool {
        true
    }

    async fn send(
        &self,
        provider: PushProvider,
        tokens: &[String],
        title: &str,
        body: &str,
        data: &PushData,
    ) -> anyhow::Result<()> {
        info!(
            "[In-memory delivery] Push through {} to {} devices: {}",
            provider,
            tokens.len(),
            title
        );
        self.record(DeliveredMessage::Push {
            provider,
            tokens: tokens.to_vec(),
            title: title.to_string(),
            body: body.to_string(),
            data: data.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_records_rendered_sms() {
        let delivery = InMemoryDelivery::new();
        let mut vars = TemplateVars::new();
        vars.insert("student_name".into(), "Ada".into());
        vars.insert("message".into(), "Algebra closes in 2 hours.".into());
        vars.insert("test_name".into(), "Algebra".into());
        vars.insert("url".into(), "http://localhost:3000/exams/t1".into());

        ISmsDelivery::send(&delivery, "+4712345678", SmsTemplate::TestReminder, &vars)
            .await
            .unwrap();

        let messages = delivery.messages();
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            DeliveredMessage::Sms { phone, text } => {
                assert_eq!(phone, "+4712345678");
                assert!(text.contains("Algebra"));
                assert!(text.contains("http://localhost:3000/exams/t1"));
            }
            other => panic!("Expected sms, got: {:?}", other),
        }
    }
}
