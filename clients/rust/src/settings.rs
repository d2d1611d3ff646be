use crate::{APIResponse, BaseClient};
use exam_notifier_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SettingsClient {
    base: Arc<BaseClient>,
}

/// Switches that are `None` keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateChannelSettingsInput {
    pub push_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub mail_enabled: Option<bool>,
}

impl SettingsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_channels(&self) -> APIResponse<get_channel_settings::APIResponse> {
        self.base
            .get("settings/channels".into(), StatusCode::OK)
            .await
    }

    pub async fn update_channels(
        &self,
        input: UpdateChannelSettingsInput,
    ) -> APIResponse<update_channel_settings::APIResponse> {
        let body = update_channel_settings::RequestBody {
            push_enabled: input.push_enabled,
            sms_enabled: input.sms_enabled,
            mail_enabled: input.mail_enabled,
        };
        self.base
            .put(body, "settings/channels".into(), StatusCode::OK)
            .await
    }
}
