use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_REMINDER_JOB_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_DELIVERY_DELAY_MILLIS: u64 = 150;
const DEFAULT_EXAM_PORTAL_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the job scheduler runs a reminder pass
    pub reminder_job_interval_secs: u64,
    /// Pause between two consecutive calls to a delivery provider.
    /// The providers rate limit us, so a single run never calls them
    /// concurrently.
    pub delivery_delay_millis: u64,
    /// Base url of the portal where students take their tests. Used to
    /// build the links sent by SMS and email.
    pub exam_portal_url: Url,
    pub brevo: Option<BrevoConfig>,
    pub bulksms: Option<BulkSmsConfig>,
    pub onesignal: Option<OneSignalConfig>,
}

#[derive(Debug, Clone)]
pub struct BrevoConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub reminder_template_id: i64,
    pub assigned_template_id: i64,
}

#[derive(Debug, Clone)]
pub struct BulkSmsConfig {
    pub token_id: String,
    pub token_secret: String,
}

#[derive(Debug, Clone)]
pub struct OneSignalConfig {
    pub app_id: String,
    pub api_key: String,
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        let exam_portal_url = match std::env::var("EXAM_PORTAL_URL") {
            Ok(url) => match Url::parse(&url) {
                Ok(url) if !url.cannot_be_a_base() => url,
                _ => {
                    warn!(
                        "The given EXAM_PORTAL_URL: {} is not valid, falling back to the default: {}.",
                        url, DEFAULT_EXAM_PORTAL_URL
                    );
                    Self::default_portal_url()
                }
            },
            Err(_) => Self::default_portal_url(),
        };

        Self {
            port: parse_env("PORT", DEFAULT_PORT),
            reminder_job_interval_secs: parse_env(
                "REMINDER_JOB_INTERVAL_SECS",
                DEFAULT_REMINDER_JOB_INTERVAL_SECS,
            ),
            delivery_delay_millis: parse_env(
                "DELIVERY_DELAY_MILLIS",
                DEFAULT_DELIVERY_DELAY_MILLIS,
            ),
            exam_portal_url,
            brevo: Self::brevo_from_env(),
            bulksms: Self::bulksms_from_env(),
            onesignal: Self::onesignal_from_env(),
        }
    }

    fn default_portal_url() -> Url {
        Url::parse(DEFAULT_EXAM_PORTAL_URL).expect("Default portal url to be valid")
    }

    fn brevo_from_env() -> Option<BrevoConfig> {
        let api_key = optional_env("BREVO_API_KEY")?;
        let sender_email = match optional_env("BREVO_SENDER_EMAIL") {
            Some(email) => email,
            None => {
                warn!("BREVO_API_KEY is set but BREVO_SENDER_EMAIL is missing. Emails will only be logged.");
                return None;
            }
        };
        info!("Brevo credentials found. Emails will be delivered through Brevo.");
        Some(BrevoConfig {
            api_key,
            sender_email,
            sender_name: optional_env("BREVO_SENDER_NAME").unwrap_or_else(|| "Exams".into()),
            reminder_template_id: parse_env("BREVO_REMINDER_TEMPLATE_ID", 1),
            assigned_template_id: parse_env("BREVO_ASSIGNED_TEMPLATE_ID", 2),
        })
    }

    fn bulksms_from_env() -> Option<BulkSmsConfig> {
        match (
            optional_env("BULKSMS_TOKEN_ID"),
            optional_env("BULKSMS_TOKEN_SECRET"),
        ) {
            (Some(token_id), Some(token_secret)) => {
                info!("BulkSMS credentials found. SMS will be delivered through BulkSMS.");
                Some(BulkSmsConfig {
                    token_id,
                    token_secret,
                })
            }
            (None, None) => None,
            _ => {
                warn!("Only one of BULKSMS_TOKEN_ID and BULKSMS_TOKEN_SECRET is set. SMS will only be logged.");
                None
            }
        }
    }

    fn onesignal_from_env() -> Option<OneSignalConfig> {
        match (optional_env("ONESIGNAL_APP_ID"), optional_env("ONESIGNAL_API_KEY")) {
            (Some(app_id), Some(api_key)) => {
                info!("OneSignal credentials found. Push notifications will be delivered through OneSignal.");
                Some(OneSignalConfig { app_id, api_key })
            }
            (None, None) => None,
            _ => {
                warn!("Only one of ONESIGNAL_APP_ID and ONESIGNAL_API_KEY is set. Push notifications will only be logged.");
                None
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for name in &[
            "PORT",
            "REMINDER_JOB_INTERVAL_SECS",
            "DELIVERY_DELAY_MILLIS",
            "EXAM_PORTAL_URL",
            "BREVO_API_KEY",
            "BREVO_SENDER_EMAIL",
            "BULKSMS_TOKEN_ID",
            "BULKSMS_TOKEN_SECRET",
            "ONESIGNAL_APP_ID",
            "ONESIGNAL_API_KEY",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial_test::serial]
    fn it_uses_defaults() {
        clear_env();
        let config = Config::new();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.delivery_delay_millis, DEFAULT_DELIVERY_DELAY_MILLIS);
        assert_eq!(config.exam_portal_url.as_str(), "http://localhost:3000/");
        assert!(config.brevo.is_none());
        assert!(config.bulksms.is_none());
        assert!(config.onesignal.is_none());
    }

    #[test]
    #[serial_test::serial]
    fn it_falls_back_on_invalid_values() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("DELIVERY_DELAY_MILLIS", "200");
        std::env::set_var("EXAM_PORTAL_URL", "mailto:someone");
        let config = Config::new();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.delivery_delay_millis, 200);
        assert_eq!(config.exam_portal_url.as_str(), "http://localhost:3000/");
        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn it_requires_complete_provider_credentials() {
        clear_env();
        std::env::set_var("BULKSMS_TOKEN_ID", "id");
        std::env::set_var("BREVO_API_KEY", "key");
        std::env::set_var("ONESIGNAL_APP_ID", "app");
        std::env::set_var("ONESIGNAL_API_KEY", "key");
        let config = Config::new();
        assert!(config.bulksms.is_none());
        assert!(config.brevo.is_none());
        assert!(config.onesignal.is_some());
        clear_env();
    }
}
