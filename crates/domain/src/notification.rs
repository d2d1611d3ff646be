use crate::{
    settings::Channel,
    shared::entity::{Entity, ID},
    test::Test,
};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A pending `Test` is approaching its deadline
    Reminder,
    /// A `Test` was just assigned
    Assigned,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Assigned => "assigned",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder" => Ok(Self::Reminder),
            "assigned" => Ok(Self::Assigned),
            _ => Err(anyhow::Error::msg(format!("Unknown notification kind: {}", s))),
        }
    }
}

/// Selects which email template the provider should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailTemplate {
    TestReminder,
    TestAssigned,
}

impl From<NotificationKind> for EmailTemplate {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Reminder => Self::TestReminder,
            NotificationKind::Assigned => Self::TestAssigned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmsTemplate {
    TestReminder,
    TestAssigned,
}

impl From<NotificationKind> for SmsTemplate {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Reminder => Self::TestReminder,
            NotificationKind::Assigned => Self::TestAssigned,
        }
    }
}

pub type TemplateVars = BTreeMap<String, String>;

fn var<'a>(vars: &'a TemplateVars, key: &str) -> &'a str {
    vars.get(key).map(|v| v.as_str()).unwrap_or_default()
}

impl SmsTemplate {
    /// Plain text body of the SMS
    pub fn render(&self, vars: &TemplateVars) -> String {
        match self {
            Self::TestReminder => format!(
                "Hi {}, {} Attempt it here: {}",
                var(vars, "student_name"),
                var(vars, "message"),
                var(vars, "url")
            ),
            Self::TestAssigned => format!(
                "Hi {}, a new test \"{}\" has been assigned to you. Attempt it here: {}",
                var(vars, "student_name"),
                var(vars, "test_name"),
                var(vars, "url")
            ),
        }
    }
}

/// Extra data attached to a push notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushData {
    pub kind: NotificationKind,
    pub test_id: String,
    pub test_name: String,
    pub url: String,
    /// Pending tests not mentioned in the notification text
    pub additional_pending: usize,
}

/// Link where a student can take `test`
pub fn exam_access_url(portal_url: &Url, test: &Test) -> anyhow::Result<Url> {
    let mut url = portal_url.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::Error::msg(format!("Portal url: {} cannot be a base", portal_url)))?
        .pop_if_empty()
        .push("exams")
        .push(&test.test_id);
    Ok(url)
}

/// Deadline of `test` formatted for humans, if it has one
pub fn format_deadline(test: &Test) -> Option<String> {
    test.end_ts
        .and_then(|ts| Utc.timestamp_millis_opt(ts).single())
        .map(|dt| dt.format("%F %H:%M UTC").to_string())
}

/// History record of one delivery attempt
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLog {
    pub id: ID,
    pub student_id: ID,
    pub test_id: ID,
    pub channel: Channel,
    pub kind: NotificationKind,
    pub success: bool,
    pub error: Option<String>,
    pub created: i64,
}

impl Entity for NotificationLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_exam_access_urls() {
        let test = Test::new("T 1", "Algebra");
        let portal = Url::parse("https://school.example.com").unwrap();
        assert_eq!(
            exam_access_url(&portal, &test).unwrap().as_str(),
            "https://school.example.com/exams/T%201"
        );

        let portal = Url::parse("https://school.example.com/app/").unwrap();
        assert_eq!(
            exam_access_url(&portal, &test).unwrap().as_str(),
            "https://school.example.com/app/exams/T%201"
        );
    }

    #[test]
    fn it_renders_sms_templates() {
        let mut vars = TemplateVars::new();
        vars.insert("student_name".into(), "Ada".into());
        vars.insert("test_name".into(), "Algebra".into());
        vars.insert("message".into(), "Algebra closes tomorrow.".into());
        vars.insert("url".into(), "https://x.io/exams/T1".into());
        assert_eq!(
            SmsTemplate::TestReminder.render(&vars),
            "Hi Ada, Algebra closes tomorrow. Attempt it here: https://x.io/exams/T1"
        );
        assert_eq!(
            SmsTemplate::TestAssigned.render(&vars),
            "Hi Ada, a new test \"Algebra\" has been assigned to you. Attempt it here: https://x.io/exams/T1"
        );
    }

    #[test]
    fn it_formats_deadlines() {
        let mut test = Test::new("T1", "Algebra");
        assert!(format_deadline(&test).is_none());
        test.end_ts = Some(1613862000000);
        assert_eq!(format_deadline(&test).unwrap(), "2021-02-20 23:00 UTC");
    }
}
