//! Pooled SQLite connection wrapper
//!
//! Maps rusqlite failures into [`StorageError`] and adds `tracing`
//! instrumentation around every statement.

use std::ops::{Deref, DerefMut};

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection as RusqliteConnection, Row, Statement as RusqliteStatement, ToSql};
use tracing::instrument;

use crate::storage::error::{StorageError, StorageResult};

/// SQLite connection wrapper
///
/// Wraps a pooled rusqlite connection. The connection is returned to the
/// pool when dropped.
pub struct SqliteConnection {
    inner: PooledConnection<SqliteConnectionManager>,
}

impl SqliteConnection {
    /// Create a new connection wrapper from a pooled connection
    pub fn new(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self { inner: conn }
    }

    /// Get a reference to the inner connection
    pub fn inner(&self) -> &RusqliteConnection {
        &self.inner
    }

    /// Execute a statement and return the number of affected rows
    #[instrument(skip(self, params), fields(sql = %sql))]
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> StorageResult<usize> {
        self.inner.execute(sql, params).map_err(StorageError::from)
    }

    /// Execute a SQL query that returns a single row
    ///
    /// The callback function is called with the row data.
    #[instrument(skip(self, params, f), fields(sql = %sql))]
    pub fn query_row<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> StorageResult<T>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        self.inner.query_row(sql, params, f).map_err(StorageError::from)
    }

    /// Execute a single-row query, mapping "no rows" to `None`
    pub fn query_optional<T, F>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        f: F,
    ) -> StorageResult<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        match self.query_row(sql, params, f) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_no_rows() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Run a query and collect every mapped row
    #[instrument(skip(self, params, f), fields(sql = %sql))]
    pub fn query_rows<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> StorageResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let mut stmt = self.prepare(sql)?;
        stmt.query_map(params, f)
    }

    /// Prepare a SQL statement for efficient repeated execution
    #[instrument(skip(self), fields(sql = %sql))]
    pub fn prepare(&self, sql: &str) -> StorageResult<SqliteStatement<'_>> {
        let stmt = self.inner.prepare(sql).map_err(StorageError::from)?;

        Ok(SqliteStatement::new(stmt))
    }

    /// Begin a transaction
    ///
    /// The transaction rolls back on drop unless committed.
    #[instrument(skip(self))]
    pub fn transaction(&mut self) -> StorageResult<rusqlite::Transaction<'_>> {
        self.inner.transaction().map_err(StorageError::from)
    }
}

// Allow using SqliteConnection as RusqliteConnection
impl Deref for SqliteConnection {
    type Target = RusqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SqliteConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Prepared statement wrapper
pub struct SqliteStatement<'conn> {
    inner: RusqliteStatement<'conn>,
}

impl<'conn> SqliteStatement<'conn> {
    /// Create a new statement wrapper
    pub fn new(stmt: RusqliteStatement<'conn>) -> Self {
        Self { inner: stmt }
    }

    /// Execute the statement with parameters
    pub fn execute(&mut self, params: &[&dyn ToSql]) -> StorageResult<usize> {
        self.inner.execute(params).map_err(StorageError::from)
    }

    /// Query with the statement and map results
    pub fn query_map<T, F>(&mut self, params: &[&dyn ToSql], mut f: F) -> StorageResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let rows = self.inner.query_map(params, |row| f(row)).map_err(StorageError::from)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for storage::connection.
    use tempfile::TempDir;

    use super::*;
    use crate::storage::{SqlitePool, SqlitePoolConfig};

    fn test_pool(dir: &TempDir) -> SqlitePool {
        let db_path = dir.path().join("test.db");
        SqlitePool::new(&db_path, SqlitePoolConfig::default()).unwrap()
    }

    #[test]
    fn test_connection_execute() {
        let temp_dir = TempDir::new().unwrap();
        let pool = test_pool(&temp_dir);
        let conn = pool.get_connection().unwrap();

        conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]).unwrap();

        let name = "Alice";
        let affected = conn.execute("INSERT INTO test (name) VALUES (?)", &[&name]).unwrap();
        assert_eq!(affected, 1);
    }

    #[test]
    fn test_query_optional_maps_missing_row_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let pool = test_pool(&temp_dir);
        let conn = pool.get_connection().unwrap();

        conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]).unwrap();
        let name = "Bob";
        conn.execute("INSERT INTO test (name) VALUES (?)", &[&name]).unwrap();

        let found: Option<String> = conn
            .query_optional("SELECT name FROM test WHERE id = ?", &[&1], |row| row.get(0))
            .unwrap();
        assert_eq!(found.as_deref(), Some("Bob"));

        let missing: Option<String> = conn
            .query_optional("SELECT name FROM test WHERE id = ?", &[&99], |row| row.get(0))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_transaction_rolls_back_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let pool = test_pool(&temp_dir);
        let mut conn = pool.get_connection().unwrap();

        conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]).unwrap();
        {
            let tx = conn.transaction().unwrap();
            tx.execute("INSERT INTO test (name) VALUES ('ghost')", []).unwrap();
        }

        let rows = conn.query_rows("SELECT name FROM test", &[], |row| row.get::<_, String>(0)).unwrap();
        assert!(rows.is_empty());
    }
}
