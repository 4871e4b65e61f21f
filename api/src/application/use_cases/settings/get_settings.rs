use crate::application::ports::settings_repository::SettingsRepository;
use crate::domain::settings::system_settings::SystemSettings;

pub struct GetSettings<'a, S: SettingsRepository + ?Sized> {
    pub repo: &'a S,
}

impl<'a, S: SettingsRepository + ?Sized> GetSettings<'a, S> {
    pub async fn execute(&self) -> anyhow::Result<SystemSettings> {
        self.repo.get_or_create().await
    }
}
