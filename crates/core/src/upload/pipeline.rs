//! Upload pipeline - validate, transform, store, then hand the URL on
//!
//! The profile field (or slider image) is only written after the blob has
//! been stored and its public URL resolved, so a failed upload leaves the
//! previous value in place.

use std::sync::Arc;

use linkpage_domain::constants::UPLOAD_TOKEN_BYTES;
use linkpage_domain::{
    impl_keyword_conversions, Image, LinkpageError, NewImage, Profile, ProfilePatch, Result,
};
use rand::RngCore;
use tracing::{error, info, instrument};

use super::ports::{BlobStorage, CropArea, ImageTransform};
use crate::profile::ProfileGateway;
use crate::session::Session;

/// What an uploaded image is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Avatar,
    Background,
    Logo,
    Slider,
}

impl_keyword_conversions!(UploadKind {
    Avatar => "avatar",
    Background => "background",
    Logo => "logo",
    Slider => "slider",
});

/// A file received from the client
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { content_type: content_type.into(), bytes }
    }
}

/// Where the resolved URL ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Profile { url: String, profile: Box<Profile> },
    SliderImage { url: String, image: Image },
}

impl UploadOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Profile { url, .. } | Self::SliderImage { url, .. } => url,
        }
    }
}

/// Accepted image MIME type → file extension
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

fn essence(content_type: &str) -> String {
    content_type.split(';').next().unwrap_or_default().trim().to_lowercase()
}

fn random_token() -> String {
    let mut bytes = [0_u8; UPLOAD_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `{user id}/{kind}-{random hex}.{ext}`
pub fn storage_path(user_id: &str, kind: UploadKind, extension: &str) -> String {
    format!("{user_id}/{kind}-{}.{extension}", random_token())
}

pub struct UploadPipeline {
    storage: Arc<dyn BlobStorage>,
    transform: Arc<dyn ImageTransform>,
    gateway: Arc<ProfileGateway>,
    max_bytes: usize,
}

impl UploadPipeline {
    pub fn new(
        storage: Arc<dyn BlobStorage>,
        transform: Arc<dyn ImageTransform>,
        gateway: Arc<ProfileGateway>,
        max_bytes: usize,
    ) -> Self {
        Self { storage, transform, gateway, max_bytes }
    }

    /// Validate, transform and store the file; returns its public URL
    #[instrument(skip(self, session, file), fields(user_id = %session.user_id(), size = file.bytes.len()))]
    pub async fn upload(
        &self,
        session: &Session,
        kind: UploadKind,
        file: UploadFile,
        crop: Option<CropArea>,
    ) -> Result<String> {
        let content_type = essence(&file.content_type);
        let extension = extension_for(&content_type).ok_or_else(|| {
            LinkpageError::InvalidInput(format!("unsupported file type '{content_type}'"))
        })?;
        if file.bytes.is_empty() {
            return Err(LinkpageError::InvalidInput("file is empty".to_string()));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(LinkpageError::InvalidInput(format!(
                "file is {} bytes, the limit is {}",
                file.bytes.len(),
                self.max_bytes
            )));
        }

        let (bytes, content_type, extension) = if kind == UploadKind::Avatar {
            let transform = Arc::clone(&self.transform);
            let source = file.bytes;
            let cropped = tokio::task::spawn_blocking(move || transform.square_crop(&source, crop))
                .await
                .map_err(|err| LinkpageError::Internal(format!("crop task failed: {err}")))??;
            (cropped, "image/jpeg".to_string(), "jpg")
        } else {
            (file.bytes, content_type, extension)
        };

        let path = storage_path(session.user_id(), kind, extension);
        self.storage.upload(&path, bytes, &content_type).await.inspect_err(|err| {
            error!(%path, error = %err, "blob upload failed");
        })?;

        let url = self.storage.public_url(&path);
        info!(%path, %url, "upload stored");
        Ok(url)
    }

    /// Upload and write the URL to the profile field (or add a slider image)
    pub async fn upload_and_apply(
        &self,
        session: &Session,
        kind: UploadKind,
        file: UploadFile,
        crop: Option<CropArea>,
    ) -> Result<UploadOutcome> {
        if kind == UploadKind::Slider && !self.gateway.can_add_image(session).await? {
            return Err(LinkpageError::InvalidInput(
                "slider image limit reached".to_string(),
            ));
        }

        let url = self.upload(session, kind, file, crop).await?;

        let patch = match kind {
            UploadKind::Slider => {
                let image = self
                    .gateway
                    .add_image(session, NewImage { url: url.clone(), alt: None })
                    .await?;
                return Ok(UploadOutcome::SliderImage { url, image });
            }
            UploadKind::Avatar => ProfilePatch { avatar: Some(url.clone()), ..ProfilePatch::default() },
            UploadKind::Background => {
                ProfilePatch { background_image: Some(url.clone()), ..ProfilePatch::default() }
            }
            UploadKind::Logo => ProfilePatch { logo: Some(Some(url.clone())), ..ProfilePatch::default() },
        };

        let profile = self.gateway.update_profile(session, patch).await?;
        Ok(UploadOutcome::Profile { url, profile: Box::new(profile) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path_shape() {
        let path = storage_path("user-1", UploadKind::Background, "png");
        let (owner, file) = path.split_once('/').unwrap();
        assert_eq!(owner, "user-1");

        let token = file.strip_prefix("background-").unwrap().strip_suffix(".png").unwrap();
        assert_eq!(token.len(), UPLOAD_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_paths_are_unique() {
        let a = storage_path("u", UploadKind::Slider, "jpg");
        let b = storage_path("u", UploadKind::Slider, "jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_type_essence() {
        assert_eq!(essence("Image/PNG; charset=binary"), "image/png");
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("application/pdf"), None);
    }
}
