//! HTTP error mapping
//!
//! Handlers return `Result<_, ApiError>`; domain errors keep their tagged
//! JSON shape (`{"type": ..., "message": ...}`) and get a status code here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkpage_domain::LinkpageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable `Authorization: Bearer <user id>` header
    #[error("Missing session")]
    MissingSession,

    #[error(transparent)]
    Domain(#[from] LinkpageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingSession => StatusCode::UNAUTHORIZED,
            Self::Domain(err) => match err {
                LinkpageError::Validation(_) | LinkpageError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                LinkpageError::Unauthorized(_) => StatusCode::FORBIDDEN,
                LinkpageError::NotFound(_) => StatusCode::NOT_FOUND,
                LinkpageError::Conflict(_) => StatusCode::CONFLICT,
                LinkpageError::Network(_) | LinkpageError::Storage(_) => StatusCode::BAD_GATEWAY,
                LinkpageError::Database(_)
                | LinkpageError::Config(_)
                | LinkpageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        }

        let body = match &self {
            Self::MissingSession => {
                json!({ "type": "Unauthenticated", "message": "missing bearer session" })
            }
            Self::Domain(err) => serde_json::to_value(err)
                .unwrap_or_else(|_| json!({ "type": "Internal", "message": err.to_string() })),
        };

        (status, Json(body)).into_response()
    }
}
