//! File storage configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// File storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory attachment files are written into
    #[serde(default = "default_root")]
    pub root: String,

    /// Public prefix of the file-serving endpoint (no trailing slash)
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Lifetime of a signed retrieval URL in seconds
    #[serde(default = "default_url_ttl")]
    pub url_ttl_secs: u64,
}

impl StorageConfig {
    /// Get URL lifetime as Duration
    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_ttl_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.root.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ROOT"));
        }
        if self.public_base_url.ends_with('/') {
            return Err(ValidationError::InvalidStorageBaseUrl);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_base_url: default_public_base_url(),
            url_ttl_secs: default_url_ttl(),
        }
    }
}

fn default_root() -> String {
    "./data/chat-attachments".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080/files".to_string()
}

// 24 hours, matching the signed-URL lifetime the product has always used.
fn default_url_ttl() -> u64 {
    60 * 60 * 24
}
