//! Error types used throughout the application

use linkpage_common::validation::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Linkpage
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LinkpageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// An owner-scoped mutation matched no rows.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinkpageError {
    /// Field errors carried by a `Validation` error, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationError> for LinkpageError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.into())
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Result type alias for Linkpage operations
pub type Result<T> = std::result::Result<T, LinkpageError>;
