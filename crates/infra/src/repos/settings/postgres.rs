use super::ISettingsRepo;
use exam_notifier_domain::ChannelSettings;
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChannelSettingsRaw {
    push_enabled: bool,
    sms_enabled: bool,
    mail_enabled: bool,
}

impl From<ChannelSettingsRaw> for ChannelSettings {
    fn from(e: ChannelSettingsRaw) -> Self {
        Self {
            push_enabled: e.push_enabled,
            sms_enabled: e.sms_enabled,
            mail_enabled: e.mail_enabled,
        }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for PostgresSettingsRepo {
    async fn get(&self) -> anyhow::Result<Option<ChannelSettings>> {
        let res: Option<ChannelSettingsRaw> = sqlx::query_as(
            r#"
            SELECT push_enabled, sms_enabled, mail_enabled FROM channel_settings
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Find channel settings failed. DB returned error: {:?}", e);
            e
        })?;
        Ok(res.map(|settings| settings.into()))
    }

    async fn save(&self, settings: &ChannelSettings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO channel_settings(singleton, push_enabled, sms_enabled, mail_enabled)
            VALUES(TRUE, $1, $2, $3)
            ON CONFLICT (singleton) DO UPDATE
            SET push_enabled = $1,
            sms_enabled = $2,
            mail_enabled = $3
            "#,
        )
        .bind(settings.push_enabled)
        .bind(settings.sms_enabled)
        .bind(settings.mail_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save channel settings: {:?}. DB returned error: {:?}",
                settings, e
            );
            e
        })?;
        Ok(())
    }
}
