use super::IPushDelivery;
use crate::config::OneSignalConfig;
use exam_notifier_domain::{PushData, PushProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

const ONESIGNAL_API_BASE_URL: &str = "https://onesignal.com/api/v1";

#[derive(Debug, Serialize)]
struct OneSignalNotification<'a> {
    app_id: &'a str,
    include_player_ids: &'a [String],
    headings: HashMap<&'static str, &'a str>,
    contents: HashMap<&'static str, &'a str>,
    data: &'a PushData,
}

impl<'a> OneSignalNotification<'a> {
    fn new(
        app_id: &'a str,
        tokens: &'a [String],
        title: &'a str,
        body: &'a str,
        data: &'a PushData,
    ) -> Self {
        let mut headings = HashMap::new();
        headings.insert("en", title);
        let mut contents = HashMap::new();
        contents.insert("en", body);
        Self {
            app_id,
            include_player_ids: tokens,
            headings,
            contents,
            data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OneSignalResponse {
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

impl OneSignalResponse {
    /// OneSignal answers with `200 OK` and an `errors` field when, for
    /// instance, none of the players are subscribed anymore
    fn into_result(self) -> anyhow::Result<()> {
        match self.errors {
            None | Some(serde_json::Value::Null) => Ok(()),
            Some(errors) => Err(anyhow::Error::msg(format!(
                "OneSignal rejected the notification: {}",
                errors
            ))),
        }
    }
}

/// Push notifications through OneSignal. Only reaches `onesignal` tokens.
pub struct OneSignalPushDelivery {
    client: Client,
    config: OneSignalConfig,
}

impl OneSignalPushDelivery {
    pub fn new(config: OneSignalConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl IPushDelivery for OneSignalPushDelivery {
    fn supports(&self, provider: PushProvider) -> bool {
        provider == PushProvider::OneSignal
    }

    async fn send(
        &self,
        provider: PushProvider,
        tokens: &[String],
        title: &str,
        body: &str,
        data: &PushData,
    ) -> anyhow::Result<()> {
        if !self.supports(provider) {
            return Err(anyhow::Error::msg(format!(
                "OneSignal cannot deliver to {} subscriptions",
                provider
            )));
        }
        let notification = OneSignalNotification::new(&self.config.app_id, tokens, title, body, data);
        let res = self
            .client
            .post(&format!("{}/notifications", ONESIGNAL_API_BASE_URL))
            .header("authorization", format!("Basic {}", self.config.api_key))
            .json(&notification)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] OneSignal API POST error. Error message: {:?}", e);
                e
            })?;
        let res = res
            .error_for_status()
            .map_err(|e| {
                error!(
                    "[Unexpected Response] OneSignal API POST error. Error message: {:?}",
                    e
                );
                e
            })?
            .json::<OneSignalResponse>()
            .await
            .map_err(|e| {
                error!(
                    "[Unexpected Response] OneSignal API POST error. Error message: {:?}",
                    e
                );
                e
            })?;
        res.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_notifier_domain::NotificationKind;
    use serde_json::json;

    #[test]
    fn it_builds_notification_body() {
        let tokens = vec!["player-1".to_string(), "player-2".to_string()];
        let data = PushData {
            kind: NotificationKind::Reminder,
            test_id: "t1".into(),
            test_name: "Algebra".into(),
            url: "http://localhost:3000/exams/t1".into(),
            additional_pending: 2,
        };
        let notification =
            OneSignalNotification::new("app", &tokens, "Last chance: Algebra", "Closes soon", &data);

        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({
                "app_id": "app",
                "include_player_ids": ["player-1", "player-2"],
                "headings": { "en": "Last chance: Algebra" },
                "contents": { "en": "Closes soon" },
                "data": {
                    "kind": "reminder",
                    "testId": "t1",
                    "testName": "Algebra",
                    "url": "http://localhost:3000/exams/t1",
                    "additionalPending": 2
                }
            })
        );
    }

    #[test]
    fn it_treats_errors_in_response_as_failure() {
        let ok: OneSignalResponse = serde_json::from_value(json!({ "id": "n1" })).unwrap();
        assert!(ok.into_result().is_ok());

        let rejected: OneSignalResponse = serde_json::from_value(
            json!({ "id": "", "errors": ["All included players are not subscribed"] }),
        )
        .unwrap();
        assert!(rejected.into_result().is_err());
    }
}
