//! Port interfaces for binary storage and image transforms

use async_trait::async_trait;
use linkpage_domain::Result;

/// Pixel rectangle chosen in the avatar cropper
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct CropArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Namespaced blob bucket
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `bytes` at `path`, overwriting nothing; path collisions are an error
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Public URL under which `path` is served
    fn public_url(&self, path: &str) -> String;
}

/// Avatar crop step
///
/// Implementations are CPU-bound and synchronous; callers run them off the
/// async executor.
pub trait ImageTransform: Send + Sync {
    /// Crop to a square (the given area, or centered when `None`) and
    /// re-encode as JPEG
    fn square_crop(&self, bytes: &[u8], area: Option<CropArea>) -> Result<Vec<u8>>;
}
