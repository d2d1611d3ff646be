use super::IEmailDelivery;
use crate::config::BrevoConfig;
use exam_notifier_domain::{EmailTemplate, TemplateVars};
use reqwest::Client;
use serde::Serialize;
use tracing::error;

const BREVO_API_BASE_URL: &str = "https://api.brevo.com/v3";

#[derive(Debug, Serialize)]
struct BrevoContact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailRequest<'a> {
    sender: BrevoContact<'a>,
    to: Vec<BrevoContact<'a>>,
    subject: &'a str,
    template_id: i64,
    params: &'a TemplateVars,
}

/// Transactional email through Brevo templates
pub struct BrevoEmailDelivery {
    client: Client,
    config: BrevoConfig,
}

impl BrevoEmailDelivery {
    pub fn new(config: BrevoConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn template_id(&self, template: EmailTemplate) -> i64 {
        match template {
            EmailTemplate::TestReminder => self.config.reminder_template_id,
            EmailTemplate::TestAssigned => self.config.assigned_template_id,
        }
    }

    fn request<'a>(
        &'a self,
        address: &'a str,
        subject: &'a str,
        template: EmailTemplate,
        vars: &'a TemplateVars,
    ) -> BrevoEmailRequest<'a> {
        BrevoEmailRequest {
            sender: BrevoContact {
                email: &self.config.sender_email,
                name: Some(self.config.sender_name.as_str()),
            },
            to: vec![BrevoContact {
                email: address,
                name: None,
            }],
            subject,
            template_id: self.template_id(template),
            params: vars,
        }
    }
}

#[async_trait::async_trait]
impl IEmailDelivery for BrevoEmailDelivery {
    async fn send(
        &self,
        address: &str,
        subject: &str,
        template: EmailTemplate,
        vars: &TemplateVars,
    ) -> anyhow::Result<()> {
        let body = self.request(address, subject, template, vars);
        let res = self
            .client
            .post(&format!("{}/smtp/email", BREVO_API_BASE_URL))
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] Brevo API POST error. Error message: {:?}", e);
                e
            })?;
        res.error_for_status().map_err(|e| {
            error!(
                "[Unexpected Response] Brevo API POST error. Error message: {:?}",
                e
            );
            e
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_selects_the_template_of_the_notification() {
        let delivery = BrevoEmailDelivery::new(BrevoConfig {
            api_key: "key".into(),
            sender_email: "exams@school.org".into(),
            sender_name: "Exams".into(),
            reminder_template_id: 7,
            assigned_template_id: 8,
        });
        let mut vars = TemplateVars::new();
        vars.insert("test_name".into(), "Algebra".into());

        let body = delivery.request(
            "ada@school.org",
            "Reminder: Algebra",
            EmailTemplate::TestReminder,
            &vars,
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "sender": { "email": "exams@school.org", "name": "Exams" },
                "to": [{ "email": "ada@school.org" }],
                "subject": "Reminder: Algebra",
                "templateId": 7,
                "params": { "test_name": "Algebra" }
            })
        );
        assert_eq!(delivery.template_id(EmailTemplate::TestAssigned), 8);
    }
}
