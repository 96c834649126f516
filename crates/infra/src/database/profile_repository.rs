//! Profile repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use linkpage_core::ProfileRepository as ProfileRepositoryPort;
use linkpage_domain::{Assignments, ProfileRecord, Result as DomainResult};
use rusqlite::Row;
use tokio::task;

use super::manager::{map_join_error, map_storage_error, DbManager};
use super::statements;

const PROFILE_COLUMNS: &str = "id, username, display_name, bio, avatar, background_image, logo,
     theme, font_family, font_color, show_social_icons, use_infinite_slider,
     image_layout, grid_columns, created_at, updated_at";

const WRITABLE: &[&str] = &[
    "username",
    "display_name",
    "bio",
    "avatar",
    "background_image",
    "logo",
    "theme",
    "font_family",
    "font_color",
    "show_social_icons",
    "use_infinite_slider",
    "image_layout",
    "grid_columns",
];

/// SQLite-backed implementation of `ProfileRepository`
pub struct SqliteProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteProfileRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepositoryPort for SqliteProfileRepository {
    async fn find_by_id(&self, user_id: &str) -> DomainResult<Option<ProfileRecord>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<ProfileRecord>> {
            let conn = db.get_connection()?;
            conn.query_optional(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                &[&user_id],
                map_profile_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<ProfileRecord>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<ProfileRecord>> {
            let conn = db.get_connection()?;
            conn.query_optional(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = ?1"),
                &[&username],
                map_profile_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn search(&self, query: Option<&str>, limit: usize) -> DomainResult<Vec<ProfileRecord>> {
        let db = Arc::clone(&self.db);
        let pattern = query.map(like_pattern);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        task::spawn_blocking(move || -> DomainResult<Vec<ProfileRecord>> {
            let conn = db.get_connection()?;
            conn.query_rows(
                &format!(
                    r"SELECT {PROFILE_COLUMNS} FROM profiles
                     WHERE ?1 IS NULL
                        OR username LIKE ?1 ESCAPE '\'
                        OR display_name LIKE ?1 ESCAPE '\'
                     ORDER BY created_at DESC, id ASC
                     LIMIT ?2"
                ),
                &[&pattern, &limit],
                map_profile_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn username_taken(&self, username: &str, user_id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM profiles WHERE username = ?1 AND id <> ?2)",
                &[&username, &user_id],
                |row| row.get::<_, bool>(0),
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, record: ProfileRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                &format!(
                    "INSERT INTO profiles ({PROFILE_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
                     ON CONFLICT(id) DO NOTHING"
                ),
                &[
                    &record.id,
                    &record.username,
                    &record.display_name,
                    &record.bio,
                    &record.avatar,
                    &record.background_image,
                    &record.logo,
                    &record.theme,
                    &record.font_family,
                    &record.font_color,
                    &record.show_social_icons,
                    &record.use_infinite_slider,
                    &record.image_layout,
                    &record.grid_columns,
                    &record.created_at,
                    &record.updated_at,
                ],
            )
            .map_err(map_storage_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(
        &self,
        user_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            statements::update_columns(
                &conn,
                "profiles",
                WRITABLE,
                assignments,
                updated_at,
                &[("id", user_id.as_str())],
            )
        })
        .await
        .map_err(map_join_error)?
    }
}

/// `%query%` with LIKE wildcards in the query taken literally
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn map_profile_row(row: &Row<'_>) -> rusqlite::Result<ProfileRecord> {
    Ok(ProfileRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        display_name: row.get(2)?,
        bio: row.get(3)?,
        avatar: row.get(4)?,
        background_image: row.get(5)?,
        logo: row.get(6)?,
        theme: row.get(7)?,
        font_family: row.get(8)?,
        font_color: row.get(9)?,
        show_social_icons: row.get(10)?,
        use_infinite_slider: row.get(11)?,
        image_layout: row.get(12)?,
        grid_columns: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}
