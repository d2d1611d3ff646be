use crate::test::Test;
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Critical,
    High,
    Medium,
    Low,
}

/// How close a `Test` is to its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Less than 2 hours left, or the deadline already passed
    Critical,
    /// 2 to 6 hours left
    High { hours_left: i64 },
    /// 6 to 24 hours left
    Today { hours_left: i64 },
    /// 24 to 48 hours left
    Tomorrow,
    /// More than 48 hours left
    Later { days_left: i64 },
    NoDeadline,
}

impl Urgency {
    pub fn classify(end_ts: Option<i64>, now: i64) -> Self {
        let end_ts = match end_ts {
            Some(ts) => ts,
            None => return Self::NoDeadline,
        };
        let remaining = end_ts - now;
        let hours_left = remaining / MILLIS_PER_HOUR;
        if remaining < 2 * MILLIS_PER_HOUR {
            Self::Critical
        } else if remaining < 6 * MILLIS_PER_HOUR {
            Self::High { hours_left }
        } else if remaining < 24 * MILLIS_PER_HOUR {
            Self::Today { hours_left }
        } else if remaining <= 48 * MILLIS_PER_HOUR {
            Self::Tomorrow
        } else {
            Self::Later {
                days_left: hours_left / 24,
            }
        }
    }

    pub fn tier(&self) -> UrgencyTier {
        match self {
            Self::Critical => UrgencyTier::Critical,
            Self::High { .. } => UrgencyTier::High,
            Self::Today { .. } | Self::Tomorrow => UrgencyTier::Medium,
            Self::Later { .. } | Self::NoDeadline => UrgencyTier::Low,
        }
    }
}

/// Human facing reminder text for a `Test`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub tier: UrgencyTier,
    pub title: String,
    pub body: String,
}

impl ReminderMessage {
    pub fn for_test(test: &Test, now: i64) -> Self {
        let urgency = Urgency::classify(test.end_ts, now);
        let name = &test.name;
        let (title, body) = match urgency {
            Urgency::Critical => (
                format!("Last chance: {}", name),
                format!(
                    "Less than 2 hours left to attempt {}. Start now!",
                    name
                ),
            ),
            Urgency::High { hours_left } => (
                format!("{} closes in {} hours", name, hours_left),
                format!(
                    "You have about {} hours left to attempt {}. Don't miss it!",
                    hours_left, name
                ),
            ),
            Urgency::Today { hours_left } => (
                format!("Reminder: {} ends today", name),
                format!(
                    "{} closes in {} hours. Make time for it today.",
                    name, hours_left
                ),
            ),
            Urgency::Tomorrow => (
                format!("Reminder: {} ends tomorrow", name),
                format!("{} closes tomorrow. Plan your attempt.", name),
            ),
            Urgency::Later { days_left } => (
                format!("{} is waiting for you", name),
                format!("You have {} days left to attempt {}.", days_left, name),
            ),
            Urgency::NoDeadline => (
                format!("{} is waiting for you", name),
                format!("You have a pending test: {}.", name),
            ),
        };

        Self {
            tier: urgency.tier(),
            title,
            body,
        }
    }

    /// Text for a newly assigned `Test`
    pub fn for_assigned_test(test: &Test, now: i64) -> Self {
        let urgency = Urgency::classify(test.end_ts, now);
        Self {
            tier: urgency.tier(),
            title: format!("New test assigned: {}", test.name),
            body: format!("{} has been assigned to you. Good luck!", test.name),
        }
    }
}
