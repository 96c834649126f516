//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "linkpage.db".to_string(), pool_size: 8 }
    }
}

/// Which blob storage adapter backs uploads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files under `local_root`, served from `public_base_url`
    #[default]
    Local,
    /// Object storage REST API at `remote_url`
    Remote,
}

/// Blob storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_root: String,
    pub public_base_url: String,
    pub remote_url: Option<String>,
    pub bucket: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_root: "uploads".to_string(),
            public_base_url: "http://127.0.0.1:8080/files".to_string(),
            remote_url: None,
            bucket: DEFAULT_BUCKET.to_string(),
            api_key: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "127.0.0.1:8080".to_string(), log_json: false }
    }
}
