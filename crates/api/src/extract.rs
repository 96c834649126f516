//! Per-request session extraction
//!
//! The auth provider is mocked: the bearer token is the user id itself.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use linkpage_core::Session;

use crate::error::ApiError;

/// Session built from `Authorization: Bearer <user id>`
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl AuthSession {
    fn from_header(value: Option<&str>) -> Result<Self, ApiError> {
        let token = value
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingSession)?;

        Session::new(token).map(Self).map_err(|_| ApiError::MissingSession)
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        Self::from_header(header)
    }
}
