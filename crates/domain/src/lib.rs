//! # Linkpage Domain
//!
//! Business domain types and models for Linkpage.
//!
//! This crate contains:
//! - Storage records (snake_case rows) and camelCase view models
//! - Typed style values (`BorderRadius`, `LinkShadow`)
//! - Static theme, font and social icon catalogs
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - Depends only on the validation primitives of `linkpage-common`
//! - No I/O
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
