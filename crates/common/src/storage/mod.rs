//! Storage primitives for the SQLite record store
//!
//! This module provides an r2d2 connection pool, a thin connection wrapper
//! that maps rusqlite failures into [`StorageError`], and per-connection
//! pragma management.

pub mod config;
pub mod connection;
pub mod error;
pub mod pool;
pub mod pragmas;

// Re-export commonly used types
pub use config::SqlitePoolConfig;
pub use connection::{SqliteConnection, SqliteStatement};
pub use error::{StorageError, StorageResult};
pub use pool::{PoolHealth, SqlitePool};
pub use pragmas::apply_connection_pragmas;
