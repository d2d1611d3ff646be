use crate::{APIResponse, BaseClient, Channel, ID};
use exam_notifier_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Clone, Default)]
pub struct RunReminderPassInput {
    /// Every channel when `None`
    pub channels: Option<Vec<Channel>>,
}

#[derive(Debug, Clone)]
pub struct NotifyTestAssignedInput {
    pub test_id: ID,
    pub channels: Option<Vec<Channel>>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs a reminder pass and waits for its report
    pub async fn run(
        &self,
        input: RunReminderPassInput,
    ) -> APIResponse<run_reminder_pass::APIResponse> {
        let body = run_reminder_pass::RequestBody {
            channels: input.channels,
            wait: Some(true),
        };
        self.base
            .post(body, "reminders/run".into(), StatusCode::OK)
            .await
    }

    /// Starts a reminder pass in the background
    pub async fn trigger(&self, input: RunReminderPassInput) -> APIResponse<()> {
        let body = run_reminder_pass::RequestBody {
            channels: input.channels,
            wait: Some(false),
        };
        self.base
            .post_without_response(body, "reminders/run".into(), StatusCode::ACCEPTED)
            .await
    }

    pub async fn notify_test_assigned(
        &self,
        input: NotifyTestAssignedInput,
    ) -> APIResponse<notify_test_assigned::APIResponse> {
        let body = notify_test_assigned::RequestBody {
            channels: input.channels,
            wait: Some(true),
        };
        self.base
            .post(
                body,
                format!("tests/{}/notify-assigned", input.test_id),
                StatusCode::OK,
            )
            .await
    }
}
