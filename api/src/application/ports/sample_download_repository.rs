use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::downloads::sample_download::SampleDownload;

#[async_trait]
pub trait SampleDownloadRepository: Send + Sync {
    async fn record(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        book_title: Option<&str>,
    ) -> anyhow::Result<SampleDownload>;
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SampleDownload>>;
}
