use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    pub fn all() -> Vec<Channel> {
        vec![Channel::Email, Channel::Sms, Channel::Push]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid channel: {0}")]
pub struct InvalidChannelError(String);

impl FromStr for Channel {
    type Err = InvalidChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" | "mail" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "push" => Ok(Self::Push),
            _ => Err(InvalidChannelError(s.to_string())),
        }
    }
}

/// Global switches for each notification `Channel`. There is only ever
/// one of these, managed by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub push_enabled: bool,
    pub sms_enabled: bool,
    pub mail_enabled: bool,
}

impl ChannelSettings {
    /// Used when no settings are stored or they cannot be read. Missing
    /// settings must never silence every notification.
    pub fn fail_open() -> Self {
        Self {
            push_enabled: true,
            sms_enabled: true,
            mail_enabled: true,
        }
    }

    pub fn all_disabled() -> Self {
        Self {
            push_enabled: false,
            sms_enabled: false,
            mail_enabled: false,
        }
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.mail_enabled,
            Channel::Sms => self.sms_enabled,
            Channel::Push => self.push_enabled,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.push_enabled || self.sms_enabled || self.mail_enabled
    }

    /// The `requested` channels that are enabled, in requested order
    pub fn enabled_among(&self, requested: &[Channel]) -> Vec<Channel> {
        let mut channels = Vec::new();
        for channel in requested {
            if self.is_enabled(*channel) && !channels.contains(channel) {
                channels.push(*channel);
            }
        }
        channels
    }
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self::fail_open()
    }
}
