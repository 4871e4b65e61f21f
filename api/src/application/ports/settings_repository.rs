use async_trait::async_trait;

use crate::domain::settings::system_settings::SystemSettings;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the singleton row, inserting defaults on first use.
    async fn get_or_create(&self) -> anyhow::Result<SystemSettings>;
    async fn save(&self, settings: &SystemSettings) -> anyhow::Result<SystemSettings>;
}
