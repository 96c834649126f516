//! Filesystem blob storage
//!
//! Objects are written below a root directory and served by the api crate
//! under `public_base_url`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use linkpage_core::BlobStorage;
use linkpage_domain::{LinkpageError, Result};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::InfraError;

pub struct LocalBlobStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self { root: root.into(), public_base_url }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative.components().all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(LinkpageError::InvalidInput(format!("invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        // Object paths carry a random token, so an existing file means a collision.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    LinkpageError::Conflict(format!("object already exists: {path}"))
                }
                _ => InfraError::from(err).into(),
            })?;
        file.write_all(&bytes).await.map_err(InfraError::from)?;
        file.flush().await.map_err(InfraError::from)?;

        debug!(path, content_type, size = bytes.len(), "blob stored on disk");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}
