use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::ports::drive_access_port::DriveAccessPort;

const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_TTL_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service-account JSON key that token minting needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path).await.map_err(|e| {
            anyhow::anyhow!("failed to read service account key {}: {e}", path.display())
        })?;
        let key: ServiceAccountKey = serde_json::from_slice(&raw)?;
        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionRequest<'a> {
    role: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    email_address: &'a str,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Grants Drive permissions as a service account using the OAuth2 JWT-bearer flow.
pub struct GoogleDriveAccess {
    client: reqwest::Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleDriveAccess {
    pub fn new(key: ServiceAccountKey) -> anyhow::Result<Self> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid service account private key: {e}"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            key,
            signing_key,
            token: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn assertion(&self) -> anyhow::Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: DRIVE_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.signing_key,
        )?)
    }

    async fn access_token(&self) -> anyhow::Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.value.clone());
            }
        }
        let assertion = self.assertion()?;
        let resp = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("token request failed: {e}"))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("token endpoint returned status {status}: {body}");
        }
        let token: TokenResponse = resp.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        tracing::debug!(expires_in = token.expires_in, "drive_token_refreshed");
        *guard = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}

#[async_trait]
impl DriveAccessPort for GoogleDriveAccess {
    async fn grant_reader(&self, file_id: &str, email: &str) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/{}/permissions",
            DRIVE_FILES_API,
            urlencoding::encode(file_id)
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&PermissionRequest {
                role: "reader",
                kind: "user",
                email_address: email,
            })
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("drive request failed: {e}"))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("drive returned status {status}: {body}");
        }
        Ok(())
    }
}
