use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadLocation {
    /// Path under the local uploads root, served from `/uploads`.
    Local { relative_path: String },
    /// Fully qualified URL returned by a hosted store.
    Remote { url: String },
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub location: UploadLocation,
    pub size: i64,
    /// Hex SHA-256 of the stored bytes.
    pub content_hash: String,
}

#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn store_upload(
        &self,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload>;
}
