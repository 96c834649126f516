//! Link repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use linkpage_core::LinkRepository as LinkRepositoryPort;
use linkpage_domain::{Assignments, LinkRecord, LinkpageError, Result as DomainResult};
use rusqlite::types::Value;
use rusqlite::Row;
use tokio::task;

use super::manager::{map_join_error, map_storage_error, DbManager};
use super::statements;

const TABLE: &str = "links";

const LINK_COLUMNS: &str = "id, user_id, title, url, display_type, icon, background_color,
     text_color, border_radius, shadow, shadow_color, position, created_at, updated_at";

const APPEND_COLUMNS: &[&str] = &[
    "user_id",
    "id",
    "title",
    "url",
    "display_type",
    "icon",
    "background_color",
    "text_color",
    "border_radius",
    "shadow",
    "shadow_color",
    "created_at",
    "updated_at",
];

const WRITABLE: &[&str] = &[
    "title",
    "url",
    "display_type",
    "icon",
    "background_color",
    "text_color",
    "border_radius",
    "shadow",
    "shadow_color",
];

/// SQLite-backed implementation of `LinkRepository`
pub struct SqliteLinkRepository {
    db: Arc<DbManager>,
}

impl SqliteLinkRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LinkRepositoryPort for SqliteLinkRepository {
    async fn list(&self, user_id: &str) -> DomainResult<Vec<LinkRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<LinkRecord>> {
            let conn = db.get_connection()?;
            conn.query_rows(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM links WHERE user_id = ?1 ORDER BY position ASC, created_at ASC"
                ),
                &[&user_id],
                map_link_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find(&self, user_id: &str, link_id: &str) -> DomainResult<Option<LinkRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let link_id = link_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<LinkRecord>> {
            let conn = db.get_connection()?;
            conn.query_optional(
                &format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1 AND user_id = ?2"),
                &[&link_id, &user_id],
                map_link_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn append(&self, record: LinkRecord) -> DomainResult<i64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<i64> {
            let conn = db.get_connection()?;
            let values = vec![
                Value::from(record.user_id),
                Value::from(record.id),
                Value::from(record.title),
                Value::from(record.url),
                Value::from(record.display_type),
                Value::from(record.icon),
                Value::from(record.background_color),
                Value::from(record.text_color),
                Value::from(record.border_radius),
                Value::from(record.shadow),
                Value::from(record.shadow_color),
                Value::from(record.created_at),
                Value::from(record.updated_at),
            ];
            statements::append(&conn, TABLE, APPEND_COLUMNS, values, None)?.ok_or_else(|| {
                LinkpageError::Internal("link append returned no position".into())
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(
        &self,
        user_id: &str,
        link_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let link_id = link_id.to_string();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            statements::update_columns(
                &conn,
                TABLE,
                WRITABLE,
                assignments,
                updated_at,
                &[("id", link_id.as_str()), ("user_id", user_id.as_str())],
            )
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_and_compact(&self, user_id: &str, link_id: &str) -> DomainResult<Option<i64>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let link_id = link_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<i64>> {
            let mut conn = db.get_connection()?;
            statements::delete_and_compact(&mut conn, TABLE, &user_id, &link_id)
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

fn map_link_row(row: &Row<'_>) -> rusqlite::Result<LinkRecord> {
    Ok(LinkRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        url: row.get(3)?,
        display_type: row.get(4)?,
        icon: row.get(5)?,
        background_color: row.get(6)?,
        text_color: row.get(7)?,
        border_radius: row.get(8)?,
        shadow: row.get(9)?,
        shadow_color: row.get(10)?,
        position: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}
