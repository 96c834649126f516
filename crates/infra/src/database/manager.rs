//! Database connection manager backed by the shared SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use linkpage_common::storage::{PoolHealth, SqliteConnection, SqlitePool, SqlitePoolConfig};
use linkpage_common::StorageError;
use linkpage_domain::constants::SCHEMA_VERSION;
use linkpage_domain::{DatabaseConfig, LinkpageError, Result};
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LinkpageError::Config(format!(
                    "cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let pool = SqlitePool::new(&path, SqlitePoolConfig::with_max_size(pool_size))
            .map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool: Arc::new(pool), path })
    }

    /// Build from the `[database]` config section.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size)
    }

    /// Single-connection in-memory database, for tests and demos.
    pub fn in_memory() -> Result<Self> {
        let pool = SqlitePool::in_memory().map_err(map_storage_error)?;
        Ok(Self { pool: Arc::new(pool), path: PathBuf::from(":memory:") })
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get_connection().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is accessible and responding.
    pub fn health_check(&self) -> Result<PoolHealth> {
        let health = self.pool.health_check();
        if health.healthy {
            Ok(health)
        } else {
            Err(LinkpageError::Database(
                health.message.unwrap_or_else(|| "database unavailable".to_string()),
            ))
        }
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        &[&SCHEMA_VERSION],
    )
    .map_err(map_storage_error)?;
    Ok(())
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> LinkpageError {
    LinkpageError::from(InfraError::from(err))
}

pub(crate) fn map_storage_error(err: StorageError) -> LinkpageError {
    LinkpageError::from(InfraError::from(err))
}

pub(crate) fn map_join_error(err: tokio::task::JoinError) -> LinkpageError {
    if err.is_cancelled() {
        LinkpageError::Internal("database task cancelled".into())
    } else {
        LinkpageError::Internal(format!("database task panicked: {err}"))
    }
}
