//! Conversions from external infrastructure errors into domain errors.

use image::ImageError;
use linkpage_common::storage::StorageError;
use linkpage_domain::LinkpageError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LinkpageError);

impl From<InfraError> for LinkpageError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LinkpageError> for InfraError {
    fn from(value: LinkpageError) -> Self {
        InfraError(value)
    }
}

trait IntoLinkpageError {
    fn into_linkpage(self) -> LinkpageError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → LinkpageError */
/* -------------------------------------------------------------------------- */

impl IntoLinkpageError for SqlError {
    fn into_linkpage(self) -> LinkpageError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        LinkpageError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        LinkpageError::Database("database is locked".into())
                    }
                    // SQLITE_CONSTRAINT_UNIQUE
                    (ErrorCode::ConstraintViolation, 2067) if message.contains("username") => {
                        LinkpageError::Conflict("username already taken".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) if message.contains("position") => {
                        LinkpageError::Conflict("list changed concurrently, reload and retry".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        LinkpageError::Conflict("record already exists".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555) => {
                        LinkpageError::Conflict("record already exists".into())
                    }
                    (ErrorCode::ConstraintViolation, _) => {
                        LinkpageError::InvalidInput(format!("constraint violation: {message}"))
                    }
                    _ => LinkpageError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => LinkpageError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                LinkpageError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                LinkpageError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => LinkpageError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => LinkpageError::Database("invalid SQL query".into()),
            other => LinkpageError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_linkpage())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → LinkpageError */
/* -------------------------------------------------------------------------- */

impl IntoLinkpageError for StorageError {
    fn into_linkpage(self) -> LinkpageError {
        match self {
            StorageError::Rusqlite(err) => err.into_linkpage(),
            StorageError::Timeout(secs) => {
                LinkpageError::Database(format!("timed out waiting {secs}s for a connection"))
            }
            other => LinkpageError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_linkpage())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LinkpageError */
/* -------------------------------------------------------------------------- */

impl IntoLinkpageError for HttpError {
    fn into_linkpage(self) -> LinkpageError {
        if self.is_timeout() {
            return LinkpageError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LinkpageError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => LinkpageError::Storage(format!("storage rejected credentials: {message}")),
                404 => LinkpageError::NotFound(message),
                413 => LinkpageError::InvalidInput(format!("file rejected as too large: {message}")),
                429 => LinkpageError::Network(message),
                400..=499 => LinkpageError::Storage(message),
                _ => LinkpageError::Network(message),
            };
        }

        LinkpageError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_linkpage())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / image::ImageError → LinkpageError */
/* -------------------------------------------------------------------------- */

impl IntoLinkpageError for std::io::Error {
    fn into_linkpage(self) -> LinkpageError {
        LinkpageError::Storage(format!("blob write failed: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_linkpage())
    }
}

impl IntoLinkpageError for ImageError {
    fn into_linkpage(self) -> LinkpageError {
        match self {
            ImageError::Decoding(err) => {
                LinkpageError::InvalidInput(format!("could not decode image: {err}"))
            }
            ImageError::Unsupported(err) => {
                LinkpageError::InvalidInput(format!("unsupported image: {err}"))
            }
            ImageError::Limits(err) => LinkpageError::InvalidInput(format!("image too large: {err}")),
            ImageError::IoError(err) => err.into_linkpage(),
            other => LinkpageError::Internal(format!("image processing failed: {other}")),
        }
    }
}

impl From<ImageError> for InfraError {
    fn from(value: ImageError) -> Self {
        InfraError(value.into_linkpage())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
