//! Modular common utilities shared across Linkpage crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field-level validation primitives
//! - `observability`: tracing instrumentation (not included by default)
//! - `platform`: pooled SQLite storage
//! - `test-utils`: temporary directory helpers for integration tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod storage;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use storage::{SqliteConnection, SqlitePool, SqlitePoolConfig, StorageError, StorageResult};
#[cfg(feature = "foundation")]
pub use validation::{
    FieldError, HexColorValidator, RequiredValidator, UrlValidator, ValidationError,
    ValidationResult, Validator,
};
