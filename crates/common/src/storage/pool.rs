//! SQLite connection pool
//!
//! Provides r2d2-based connection pooling with per-connection pragmas.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::config::SqlitePoolConfig;
use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};

/// Snapshot of pool health for health endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolHealth {
    pub healthy: bool,
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
    pub message: Option<String>,
}

/// SQLite connection pool
///
/// Manages a pool of SQLite connections using r2d2. Every connection gets
/// WAL mode, foreign keys and a busy timeout applied on checkout.
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
    connections_acquired: AtomicU64,
    connection_errors: AtomicU64,
}

impl SqlitePool {
    /// Create a new SQLite connection pool
    ///
    /// # Errors
    /// Returns an error if the database file can't be opened or the pool
    /// cannot hand out its first connection.
    #[instrument(fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        info!("Creating SQLite connection pool");

        let pool_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pool_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        Self::build(manager, config)
    }

    /// Create a pool over a private in-memory database.
    ///
    /// The pool is capped at one connection because every in-memory
    /// connection would otherwise see its own empty database.
    pub fn in_memory() -> StorageResult<Self> {
        let config = SqlitePoolConfig { max_size: 1, enable_wal: false, ..SqlitePoolConfig::default() };
        let pool_config = config.clone();
        let manager = SqliteConnectionManager::memory().with_init(move |conn| {
            apply_connection_pragmas(conn, &pool_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        Self::build(manager, config)
    }

    fn build(manager: SqliteConnectionManager, config: SqlitePoolConfig) -> StorageResult<Self> {
        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                StorageError::Connection(format!("Failed to create pool: {e}"))
            })?;

        info!("SQLite pool created successfully with {} connections", config.max_size);

        Ok(Self {
            pool,
            config,
            connections_acquired: AtomicU64::new(0),
            connection_errors: AtomicU64::new(0),
        })
    }

    /// Get a connection from the pool
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get_connection(&self) -> StorageResult<SqliteConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                self.connections_acquired.fetch_add(1, Ordering::Relaxed);
                debug!("Connection acquired in {}ms", start.elapsed().as_millis());
                Ok(SqliteConnection::new(conn))
            }
            Err(e) => {
                self.connection_errors.fetch_add(1, Ordering::Relaxed);
                let err_str = e.to_string().to_lowercase();

                if err_str.contains("timed out") || err_str.contains("timeout") {
                    warn!("Connection timeout after {:?}", self.config.connection_timeout);
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    warn!("Connection error: {}", e);
                    Err(StorageError::Connection(format!("Failed to get connection: {e}")))
                }
            }
        }
    }

    /// Check that the pool can still hand out a working connection
    pub fn health_check(&self) -> PoolHealth {
        let state = self.pool.state();

        let ping = self.get_connection().and_then(|conn| {
            conn.query_row("SELECT 1", &[], |row| row.get::<_, i32>(0))
        });

        match ping {
            Ok(_) => PoolHealth {
                healthy: true,
                connections: state.connections,
                idle_connections: state.idle_connections,
                max_connections: self.config.max_size,
                message: None,
            },
            Err(e) => PoolHealth {
                healthy: false,
                connections: state.connections,
                idle_connections: state.idle_connections,
                max_connections: self.config.max_size,
                message: Some(format!("Pool unhealthy: {e}")),
            },
        }
    }

    /// Maximum number of pooled connections
    pub fn max_size(&self) -> u32 {
        self.config.max_size
    }

    /// Total connections handed out since the pool was created
    pub fn connections_acquired(&self) -> u64 {
        self.connections_acquired.load(Ordering::Relaxed)
    }
}
