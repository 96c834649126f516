//! Object storage over a Supabase-style REST API
//!
//! `POST {base}/storage/v1/object/{bucket}/{path}` stores an object;
//! `{base}/storage/v1/object/public/{bucket}/{path}` serves it.

use async_trait::async_trait;
use linkpage_core::BlobStorage;
use linkpage_domain::{LinkpageError, Result, StorageConfig};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, warn};
use url::Url;

use crate::errors::InfraError;
use crate::http::HttpClient;

pub struct RemoteBlobStorage {
    client: HttpClient,
    base_url: Url,
    bucket: String,
    api_key: Option<String>,
}

impl RemoteBlobStorage {
    pub fn new(
        client: HttpClient,
        base_url: &str,
        bucket: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| LinkpageError::Config(format!("invalid storage url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LinkpageError::Config(format!("storage url cannot be a base: {base_url}")));
        }
        Ok(Self { client, base_url, bucket: bucket.into(), api_key })
    }

    pub fn from_config(client: HttpClient, config: &StorageConfig) -> Result<Self> {
        let remote_url = config.remote_url.as_deref().ok_or_else(|| {
            LinkpageError::Config("storage.remote_url is required for the remote backend".into())
        })?;
        Self::new(client, remote_url, config.bucket.clone(), config.api_key.clone())
    }

    fn object_url(&self, segments: &[&str]) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/storage/v1/object/{}", segments.join("/"))
    }
}

#[async_trait]
impl BlobStorage for RemoteBlobStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = self.object_url(&[self.bucket.as_str(), path]);
        let size = bytes.len();

        let mut request = self
            .client
            .request(Method::POST, url.as_str())
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}")).header("apikey", key);
        }

        let response = self.client.send(request).await?;
        if let Err(err) = response.error_for_status() {
            warn!(%url, status = ?err.status(), "object upload rejected");
            return Err(InfraError::from(err).into());
        }

        debug!(%url, size, "object uploaded");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.object_url(&["public", self.bucket.as_str(), path])
    }
}
