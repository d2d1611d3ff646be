use exam_notifier_domain::ChannelSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSettingsDTO {
    pub push_enabled: bool,
    pub sms_enabled: bool,
    pub mail_enabled: bool,
}

impl ChannelSettingsDTO {
    pub fn new(settings: &ChannelSettings) -> Self {
        Self {
            push_enabled: settings.push_enabled,
            sms_enabled: settings.sms_enabled,
            mail_enabled: settings.mail_enabled,
        }
    }
}
