mod base;
mod reminder;
mod settings;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use exam_notifier_api_structs::dtos::*;
pub use exam_notifier_domain::{Channel, ID};
use reminder::ReminderClient;
pub use reminder::{NotifyTestAssignedInput, RunReminderPassInput};
use settings::SettingsClient;
pub use settings::UpdateChannelSettingsInput;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use exam_notifier_api_structs::dtos::ChannelSettingsDTO as ChannelSettings;
pub use exam_notifier_api_structs::dtos::ReminderPassReportDTO as ReminderPassReport;

/// Exam Notifier Server SDK
///
/// The SDK contains methods for interacting with the Exam Notifier server
/// API.
#[derive(Clone)]
pub struct NotifierSDK {
    pub reminder: ReminderClient,
    pub settings: SettingsClient,
    pub status: StatusClient,
}

impl NotifierSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let reminder = ReminderClient::new(base.clone());
        let settings = SettingsClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            reminder,
            settings,
            status,
        }
    }
}
