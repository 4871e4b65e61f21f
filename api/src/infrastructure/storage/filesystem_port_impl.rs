use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::core::{join_name, sanitize_filename, sha256_hex, split_name};
use crate::application::ports::storage_port::{StoragePort, StoredUpload, UploadLocation};

/// Writes uploads under a local directory that the HTTP layer serves at `/uploads`.
pub struct FsStoragePort {
    pub uploads_root: PathBuf,
}

impl FsStoragePort {
    pub fn new(uploads_root: PathBuf) -> Self {
        Self { uploads_root }
    }
}

#[async_trait]
impl StoragePort for FsStoragePort {
    async fn store_upload(
        &self,
        original_filename: Option<&str>,
        _content_type: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload> {
        fs::create_dir_all(&self.uploads_root).await?;

        let safe = sanitize_filename(original_filename.unwrap_or("file.bin"));
        let (stem, ext) = split_name(&safe);
        let ts = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let stamped = format!("{}_{}", stem, ts);

        let mut name = join_name(&stamped, &ext);
        let mut candidate = self.uploads_root.join(&name);
        let mut counter = 1;
        while fs::try_exists(&candidate).await.unwrap_or(false) {
            name = join_name(&format!("{}-{}", stamped, counter), &ext);
            candidate = self.uploads_root.join(&name);
            counter += 1;
        }

        fs::write(&candidate, bytes).await?;
        tracing::debug!(path = %candidate.display(), "upload_written");
        Ok(StoredUpload {
            filename: name.clone(),
            location: UploadLocation::Local {
                relative_path: name,
            },
            size: bytes.len() as i64,
            content_hash: sha256_hex(bytes),
        })
    }
}
