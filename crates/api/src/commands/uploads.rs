//! Image upload command
//!
//! The raw request body is the file; `Content-Type` names its format. Avatar
//! uploads may carry the cropper's rectangle as `?x=&y=&width=&height=`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use linkpage_core::{CropArea, UploadFile, UploadKind, UploadOutcome};
use linkpage_domain::{Image, LinkpageError, Profile};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::utils::command_helpers::execute_command;

#[derive(Debug, Default, Deserialize)]
pub struct CropQuery {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl CropQuery {
    /// All four values, or none; a partial rectangle is rejected
    fn area(&self) -> Result<Option<CropArea>, LinkpageError> {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => {
                Ok(Some(CropArea { x, y, width, height }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(LinkpageError::InvalidInput(
                "crop needs x, y, width and height together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Profile { url, profile } => {
                Self { url, profile: Some(*profile), image: None }
            }
            UploadOutcome::SliderImage { url, image } => Self { url, profile: None, image: Some(image) },
        }
    }
}

/// Store an image and apply its URL (avatar, background, logo or slider)
pub async fn upload_image(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Path(kind): Path<String>,
    Query(crop): Query<CropQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    execute_command("uploads::upload_image", || async {
        let kind: UploadKind = kind.parse().map_err(LinkpageError::InvalidInput)?;
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| LinkpageError::InvalidInput("missing content type".to_string()))?;
        let file = UploadFile::new(content_type, body.to_vec());

        ctx.uploads.upload_and_apply(&session, kind, file, crop.area()?).await
    })
    .await
    .map(|outcome| Json(outcome.into()))
}
