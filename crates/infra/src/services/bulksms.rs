use super::ISmsDelivery;
use crate::config::BulkSmsConfig;
use exam_notifier_domain::{SmsTemplate, TemplateVars};
use reqwest::Client;
use serde::Serialize;
use tracing::error;

const BULKSMS_API_BASE_URL: &str = "https://api.bulksms.com/v1";

#[derive(Debug, Serialize)]
struct BulkSmsMessage<'a> {
    to: &'a str,
    body: String,
}

pub struct BulkSmsDelivery {
    client: Client,
    config: BulkSmsConfig,
}

impl BulkSmsDelivery {
    pub fn new(config: BulkSmsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl ISmsDelivery for BulkSmsDelivery {
    async fn send(
        &self,
        phone: &str,
        template: SmsTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        let message = BulkSmsMessage {
            to: phone,
            body: template.render(vars),
        };
        let res = self
            .client
            .post(&format!("{}/messages", BULKSMS_API_BASE_URL))
            .basic_auth(&self.config.token_id, Some(&self.config.token_secret))
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] BulkSMS API POST error. Error message: {:?}", e);
                e
            })?;
        res.error_for_status().map_err(|e| {
            error!(
                "[Unexpected Response] BulkSMS API POST error. Error message: {:?}",
                e
            );
            e
        })?;
        Ok(())
    }
}
