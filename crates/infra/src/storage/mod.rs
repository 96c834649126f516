//! Blob storage adapters

pub mod local;
pub mod remote;

use std::sync::Arc;

use linkpage_core::BlobStorage;
use linkpage_domain::{Result, StorageBackend, StorageConfig};

pub use local::LocalBlobStorage;
pub use remote::RemoteBlobStorage;

use crate::http::HttpClient;

/// Build the adapter selected by `config.backend`.
pub fn blob_storage_from_config(config: &StorageConfig) -> Result<Arc<dyn BlobStorage>> {
    match config.backend {
        StorageBackend::Local => Ok(Arc::new(LocalBlobStorage::new(
            &config.local_root,
            config.public_base_url.clone(),
        ))),
        StorageBackend::Remote => {
            let client = HttpClient::builder()
                .user_agent(concat!("linkpage/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Arc::new(RemoteBlobStorage::from_config(client, config)?))
        }
    }
}
