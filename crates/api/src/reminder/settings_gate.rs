use exam_notifier_domain::ChannelSettings;
use exam_notifier_infra::NotifierContext;
use tracing::{info, warn};

/// Fetches the current `ChannelSettings`. Never fails: when nothing is
/// stored, or the store cannot be read, every channel is enabled.
pub async fn load_channel_settings(ctx: &NotifierContext) -> ChannelSettings {
    match ctx.repos.settings.get().await {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            info!("No channel settings are stored. Every channel is enabled.");
            ChannelSettings::fail_open()
        }
        Err(e) => {
            warn!(
                "Unable to read channel settings, every channel is enabled. Error: {:?}",
                e
            );
            ChannelSettings::fail_open()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_notifier_infra::Repos;
    use std::sync::Arc;

    struct UnreachableSettingsRepo {}

    #[async_trait::async_trait]
    impl exam_notifier_infra::ISettingsRepo for UnreachableSettingsRepo {
        async fn get(&self) -> anyhow::Result<Option<ChannelSettings>> {
            Err(anyhow::Error::msg("connection refused"))
        }

        async fn save(&self, _settings: &ChannelSettings) -> anyhow::Result<()> {
            Err(anyhow::Error::msg("connection refused"))
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_enables_every_channel_without_stored_settings() {
        let ctx = NotifierContext::create_inmemory();
        assert_eq!(
            load_channel_settings(&ctx).await,
            ChannelSettings::fail_open()
        );
    }

    #[actix_web::main]
    #[test]
    async fn it_enables_every_channel_when_settings_are_unreadable() {
        let ctx = NotifierContext {
            repos: Repos {
                settings: Arc::new(UnreachableSettingsRepo {}),
                ..Repos::create_inmemory()
            },
            ..NotifierContext::create_inmemory()
        };
        assert_eq!(
            load_channel_settings(&ctx).await,
            ChannelSettings::fail_open()
        );
    }

    #[actix_web::main]
    #[test]
    async fn it_uses_stored_settings() {
        let ctx = NotifierContext::create_inmemory();
        let mut settings = ChannelSettings::all_disabled();
        settings.sms_enabled = true;
        ctx.repos.settings.save(&settings).await.unwrap();

        let loaded = load_channel_settings(&ctx).await;
        assert_eq!(loaded, settings);
        assert!(loaded.any_enabled());
    }
}
