use crate::dtos::ReminderPassReportDTO;
use exam_notifier_domain::{Channel, ReminderPassReport, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPassReportResponse {
    pub report: ReminderPassReportDTO,
}

impl ReminderPassReportResponse {
    pub fn new(report: ReminderPassReport) -> Self {
        Self {
            report: ReminderPassReportDTO::new(report),
        }
    }
}

pub mod run_reminder_pass {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Defaults to every channel
        #[serde(default)]
        pub channels: Option<Vec<Channel>>,
        /// Respond with the report once the pass completes instead of
        /// accepting the pass and running it in the background
        #[serde(default)]
        pub wait: Option<bool>,
    }

    pub type APIResponse = ReminderPassReportResponse;
}

pub mod notify_test_assigned {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub test_id: ID,
    }

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub channels: Option<Vec<Channel>>,
        #[serde(default)]
        pub wait: Option<bool>,
    }

    pub type APIResponse = ReminderPassReportResponse;
}
