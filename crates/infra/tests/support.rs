use std::sync::Arc;

use linkpage_core::{ProfileGateway, Session};
use linkpage_infra::database::{
    DbManager, SqliteImageRepository, SqliteLinkRepository, SqliteProfileRepository,
};
use tempfile::TempDir;

/// Temporary migrated database that keeps its file alive for the duration
/// of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let db_path = dir.path().join("linkpage-test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), dir }
    }

    /// Gateway wired to the SQLite repositories
    pub fn gateway(&self) -> Arc<ProfileGateway> {
        Arc::new(ProfileGateway::new(
            Arc::new(SqliteProfileRepository::new(Arc::clone(&self.manager))),
            Arc::new(SqliteLinkRepository::new(Arc::clone(&self.manager))),
            Arc::new(SqliteImageRepository::new(Arc::clone(&self.manager))),
        ))
    }

    /// Raw `(id, position)` rows of `table` for `user_id`, position order
    pub fn positions(&self, table: &str, user_id: &str) -> Vec<(String, i64)> {
        let conn = self.manager.get_connection().expect("connection");
        conn.query_rows(
            &format!("SELECT id, position FROM {table} WHERE user_id = ?1 ORDER BY position"),
            &[&user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("position query")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn session(user_id: &str) -> Session {
    Session::new(user_id).expect("valid session")
}
