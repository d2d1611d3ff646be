use crate::dtos::ChannelSettingsDTO;
use exam_notifier_domain::ChannelSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSettingsResponse {
    pub settings: ChannelSettingsDTO,
}

impl ChannelSettingsResponse {
    pub fn new(settings: ChannelSettings) -> Self {
        Self {
            settings: ChannelSettingsDTO::new(&settings),
        }
    }
}

pub mod get_channel_settings {
    use super::*;

    pub type APIResponse = ChannelSettingsResponse;
}

pub mod update_channel_settings {
    use super::*;

    /// Switches that are left out keep their current value
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub push_enabled: Option<bool>,
        #[serde(default)]
        pub sms_enabled: Option<bool>,
        #[serde(default)]
        pub mail_enabled: Option<bool>,
    }

    pub type APIResponse = ChannelSettingsResponse;
}
