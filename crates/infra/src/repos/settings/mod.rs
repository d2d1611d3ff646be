mod inmemory;
mod postgres;

pub use inmemory::InMemorySettingsRepo;
pub use postgres::PostgresSettingsRepo;

use exam_notifier_domain::ChannelSettings;

/// Storage of the `ChannelSettings` singleton
#[async_trait::async_trait]
pub trait ISettingsRepo: Send + Sync {
    /// `None` if the settings were never stored
    async fn get(&self) -> anyhow::Result<Option<ChannelSettings>>;
    async fn save(&self, settings: &ChannelSettings) -> anyhow::Result<()>;
}
