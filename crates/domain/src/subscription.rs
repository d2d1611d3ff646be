use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushProvider {
    OneSignal,
    WebPush,
}

impl PushProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneSignal => "onesignal",
            Self::WebPush => "webpush",
        }
    }
}

impl Display for PushProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Unknown push provider: {0}")]
pub struct UnknownPushProviderError(String);

impl FromStr for PushProvider {
    type Err = UnknownPushProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onesignal" => Ok(Self::OneSignal),
            "webpush" => Ok(Self::WebPush),
            _ => Err(UnknownPushProviderError(s.to_string())),
        }
    }
}

/// A push destination for a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: ID,
    pub user_id: ID,
    pub provider: PushProvider,
    /// Opaque provider specific token, e.g. a OneSignal player id
    pub token: String,
    pub active: bool,
}

impl Subscription {
    pub fn new(user_id: ID, provider: PushProvider, token: &str) -> Self {
        Self {
            id: Default::default(),
            user_id,
            provider,
            token: token.to_string(),
            active: true,
        }
    }
}

impl Entity for Subscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Groups the tokens of `subscriptions` per provider, skipping duplicates
pub fn tokens_by_provider(subscriptions: &[Subscription]) -> Vec<(PushProvider, Vec<String>)> {
    let mut grouped: Vec<(PushProvider, Vec<String>)> = Vec::new();
    for subscription in subscriptions.iter().filter(|s| s.active) {
        match grouped.iter_mut().find(|(p, _)| *p == subscription.provider) {
            Some((_, tokens)) => {
                if !tokens.contains(&subscription.token) {
                    tokens.push(subscription.token.clone());
                }
            }
            None => grouped.push((subscription.provider, vec![subscription.token.clone()])),
        }
    }
    grouped
}
