mod disabled;
mod google;

pub use disabled::DisabledDriveAccess;
pub use google::{GoogleDriveAccess, ServiceAccountKey};

use std::path::{Path, PathBuf};

/// Searched when `GOOGLE_SERVICE_ACCOUNT_KEY` is not set.
pub const DEFAULT_KEY_PATHS: &[&str] = &[
    "/etc/secrets/service-account-key.json",
    "./config/service-account-key.json",
];

pub fn resolve_key_path(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = configured.map(str::trim).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    DEFAULT_KEY_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}
