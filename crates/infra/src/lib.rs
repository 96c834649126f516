//! # Linkpage Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for profiles, links and slider images
//! - Blob storage adapters (local filesystem, remote object storage)
//! - The avatar crop transform
//! - HTTP client and configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `linkpage-core`
//! - Depends on `linkpage-common`, `linkpage-domain` and `linkpage-core`
//! - Contains all "impure" code (I/O, SQL, HTTP)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod media;
pub mod storage;

// Re-export commonly used items
pub use database::{DbManager, SqliteImageRepository, SqliteLinkRepository, SqliteProfileRepository};
pub use errors::InfraError;
pub use http::HttpClient;
pub use media::SquareCropTransform;
pub use storage::{blob_storage_from_config, LocalBlobStorage, RemoteBlobStorage};
