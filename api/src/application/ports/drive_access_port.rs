use async_trait::async_trait;

/// Grants a customer read access to a vendor-owned file.
#[async_trait]
pub trait DriveAccessPort: Send + Sync {
    async fn grant_reader(&self, file_id: &str, email: &str) -> anyhow::Result<()>;
}
