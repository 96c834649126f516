//! SQLite connection pool configuration

use std::time::Duration;

/// SQLite pool configuration
///
/// Carries the r2d2 sizing and the per-connection pragma switches.
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// Connection timeout
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite operations
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key constraints
    pub enable_foreign_keys: bool,
}

impl SqlitePoolConfig {
    /// Configuration with the given pool size and defaults for everything else.
    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size: max_size.max(1), ..Self::default() }
    }
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}
