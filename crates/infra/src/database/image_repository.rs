//! Slider image repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use linkpage_core::ImageRepository as ImageRepositoryPort;
use linkpage_domain::{Assignments, ImageRecord, Result as DomainResult};
use rusqlite::types::Value;
use rusqlite::Row;
use tokio::task;

use super::manager::{map_join_error, map_storage_error, DbManager};
use super::statements;

const TABLE: &str = "images";

const IMAGE_COLUMNS: &str = "id, user_id, url, alt, position, created_at, updated_at";

const APPEND_COLUMNS: &[&str] = &["user_id", "id", "url", "alt", "created_at", "updated_at"];

const WRITABLE: &[&str] = &["url", "alt"];

/// SQLite-backed implementation of `ImageRepository`
pub struct SqliteImageRepository {
    db: Arc<DbManager>,
}

impl SqliteImageRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImageRepositoryPort for SqliteImageRepository {
    async fn list(&self, user_id: &str) -> DomainResult<Vec<ImageRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<ImageRecord>> {
            let conn = db.get_connection()?;
            conn.query_rows(
                &format!(
                    "SELECT {IMAGE_COLUMNS} FROM images WHERE user_id = ?1 ORDER BY position ASC, created_at ASC"
                ),
                &[&user_id],
                map_image_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find(&self, user_id: &str, image_id: &str) -> DomainResult<Option<ImageRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let image_id = image_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<ImageRecord>> {
            let conn = db.get_connection()?;
            conn.query_optional(
                &format!("SELECT {IMAGE_COLUMNS} FROM images WHERE id = ?1 AND user_id = ?2"),
                &[&image_id, &user_id],
                map_image_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count(&self, user_id: &str) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT COUNT(*) FROM images WHERE user_id = ?1",
                &[&user_id],
                |row| row.get::<_, usize>(0),
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn append(&self, record: ImageRecord, limit: usize) -> DomainResult<Option<i64>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<i64>> {
            let conn = db.get_connection()?;
            let values = vec![
                Value::from(record.user_id),
                Value::from(record.id),
                Value::from(record.url),
                Value::from(record.alt),
                Value::from(record.created_at),
                Value::from(record.updated_at),
            ];
            statements::append(&conn, TABLE, APPEND_COLUMNS, values, Some(limit))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(
        &self,
        user_id: &str,
        image_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let image_id = image_id.to_string();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            statements::update_columns(
                &conn,
                TABLE,
                WRITABLE,
                assignments,
                updated_at,
                &[("id", image_id.as_str()), ("user_id", user_id.as_str())],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_and_compact(
        &self,
        user_id: &str,
        image_id: &str,
    ) -> DomainResult<Option<i64>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let image_id = image_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<i64>> {
            let mut conn = db.get_connection()?;
            statements::delete_and_compact(&mut conn, TABLE, &user_id, &image_id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn apply_positions(
        &self,
        user_id: &str,
        positions: &[(String, i64)],
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let positions = positions.to_vec();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let mut conn = db.get_connection()?;
            statements::apply_positions(&mut conn, TABLE, &user_id, &positions)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_image_row(row: &Row<'_>) -> rusqlite::Result<ImageRecord> {
    Ok(ImageRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        url: row.get(2)?,
        alt: row.get(3)?,
        position: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
