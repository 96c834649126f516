//! # Linkpage API
//!
//! HTTP application layer - routes, handlers and the main entry point.
//!
//! This crate contains:
//! - Route handlers (JSON over HTTP → profile gateway)
//! - Application context (dependency injection)
//! - Bearer session extraction and error → status mapping
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Serves locally stored uploads under `/files`

pub mod commands;
pub mod context;
pub mod error;
pub mod extract;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use error::ApiError;
pub use extract::AuthSession;
pub use routes::build_router;
