use async_trait::async_trait;

use crate::application::ports::drive_access_port::DriveAccessPort;

/// Used when no service-account key is available. Every grant fails, which
/// leaves order items ungranted for a later retry.
pub struct DisabledDriveAccess;

#[async_trait]
impl DriveAccessPort for DisabledDriveAccess {
    async fn grant_reader(&self, file_id: &str, email: &str) -> anyhow::Result<()> {
        tracing::warn!(file_id, email, "drive_access_disabled");
        anyhow::bail!("Google Drive access is not configured")
    }
}
