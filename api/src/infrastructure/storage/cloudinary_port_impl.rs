use async_trait::async_trait;
use serde::Deserialize;

use super::core::{sanitize_filename, sha256_hex};
use crate::application::ports::storage_port::{StoragePort, StoredUpload, UploadLocation};
use crate::bootstrap::config::CloudinaryConfig;

const UPLOAD_ENDPOINT: &str = "https://api.cloudinary.com/v1_1";

/// Signed uploads to Cloudinary's REST API with `resource_type=auto`.
pub struct CloudinaryStoragePort {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    #[serde(default)]
    bytes: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryStoragePort {
    pub fn new(cfg: &CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name: cfg.cloud_name.clone(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
            folder: cfg.folder.clone(),
        }
    }
}

/// SHA-256 over `k=v` pairs sorted by key and joined with `&`, followed by the secret.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    sha256_hex(format!("{}{}", joined, api_secret).as_bytes())
}

#[async_trait]
impl StoragePort for CloudinaryStoragePort {
    async fn store_upload(
        &self,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload> {
        let filename = sanitize_filename(original_filename.unwrap_or("file.bin"));
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", &self.folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let mut file_part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename.clone());
        if let Some(ct) = content_type {
            file_part = file_part
                .mime_str(ct)
                .map_err(|e| anyhow::anyhow!("invalid content type {ct}: {e}"))?;
        }
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let url = format!("{}/{}/auto/upload", UPLOAD_ENDPOINT, self.cloud_name);
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("cloudinary request failed: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_default();
            anyhow::bail!("cloudinary returned status {status}: {detail}");
        }
        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read cloudinary response: {e}"))?;

        Ok(StoredUpload {
            filename,
            location: UploadLocation::Remote {
                url: body.secure_url,
            },
            size: body.bytes.unwrap_or(bytes.len() as i64),
            content_hash: sha256_hex(bytes),
        })
    }
}
