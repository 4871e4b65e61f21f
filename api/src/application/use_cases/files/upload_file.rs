use std::path::Path;

use crate::application::ports::storage_port::{StoragePort, UploadLocation};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "pdf"];

pub struct UploadFile<'a, S: StoragePort + ?Sized> {
    pub storage: &'a S,
    pub public_base_url: Option<String>,
}

pub struct UploadedFile {
    pub url: String,
    pub filename: String,
    pub size: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("Only jpg, jpeg, png, webp and pdf files are allowed")]
    UnsupportedType,
    #[error("Upload failed")]
    Storage(#[source] anyhow::Error),
}

pub fn is_allowed_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
}

impl<'a, S: StoragePort + ?Sized> UploadFile<'a, S> {
    pub async fn execute(
        &self,
        bytes: Vec<u8>,
        orig_filename: Option<String>,
        content_type: Option<String>,
    ) -> Result<UploadedFile, UploadError> {
        let name = orig_filename.as_deref().unwrap_or_default();
        if !is_allowed_filename(name) {
            return Err(UploadError::UnsupportedType);
        }
        let stored = self
            .storage
            .store_upload(Some(name), content_type.as_deref(), &bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, filename = %name, "store_upload_failed");
                UploadError::Storage(err)
            })?;
        let url = match stored.location {
            UploadLocation::Remote { url } => url,
            UploadLocation::Local { relative_path } => {
                let relative = relative_path.trim_start_matches('/');
                if let Some(base) = self.public_base_url.as_deref() {
                    let origin = base.trim_end_matches('/');
                    format!("{}/uploads/{}", origin, relative)
                } else {
                    format!("/uploads/{}", relative)
                }
            }
        };
        tracing::info!(url = %url, size = stored.size, sha256 = %stored.content_hash, "file_uploaded");
        Ok(UploadedFile {
            url,
            filename: stored.filename,
            size: stored.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_images_and_pdf_are_accepted() {
        assert!(is_allowed_filename("cover.JPG"));
        assert!(is_allowed_filename("sample.pdf"));
        assert!(is_allowed_filename("back.webp"));
        assert!(!is_allowed_filename("script.svg"));
        assert!(!is_allowed_filename("archive.tar.gz"));
        assert!(!is_allowed_filename("noext"));
        assert!(!is_allowed_filename(""));
    }
}
