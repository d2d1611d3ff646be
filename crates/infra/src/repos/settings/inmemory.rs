use super::ISettingsRepo;
use exam_notifier_domain::ChannelSettings;

pub struct InMemorySettingsRepo {
    settings: std::sync::Mutex<Option<ChannelSettings>>,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: std::sync::Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for InMemorySettingsRepo {
    async fn get(&self) -> anyhow::Result<Option<ChannelSettings>> {
        Ok(*self.settings.lock().unwrap())
    }

    async fn save(&self, settings: &ChannelSettings) -> anyhow::Result<()> {
        *self.settings.lock().unwrap() = Some(*settings);
        Ok(())
    }
}
