//! In-memory repository implementations for testing
//!
//! Provides mocks for the three record-store ports, enabling deterministic
//! gateway tests without a database. Ownership scoping and the atomic
//! delete/renumber behave like the SQLite adapters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use linkpage_core::{ImageRepository, LinkRepository, ProfileRepository};
use linkpage_domain::{
    Assignments, ColumnValue, ImageRecord, LinkRecord, LinkpageError, ProfileRecord,
    Result as DomainResult,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

// ============================================================================
// Failure injection shared by the child repositories
// ============================================================================

/// Counts writes, can be told to fail them, and can hold the next write
/// until released
#[derive(Default)]
pub struct WriteSwitch {
    fail: AtomicBool,
    writes: AtomicUsize,
    held: AtomicBool,
    gate: Notify,
}

impl WriteSwitch {
    pub fn fail_writes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Park the next write before it touches any row
    pub fn hold_next_write(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let a held write continue
    pub fn release(&self) {
        self.gate.notify_one();
    }

    async fn enter(&self) -> DomainResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.held.swap(false, Ordering::SeqCst) {
            self.gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            Err(LinkpageError::Network("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Default, Clone)]
pub struct MockProfileRepository {
    rows: Arc<Mutex<HashMap<String, ProfileRecord>>>,
}

impl MockProfileRepository {
    pub fn with_profile(self, record: ProfileRecord) -> Self {
        self.rows.lock().insert(record.id.clone(), record);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }
}

fn text(value: &ColumnValue) -> Option<String> {
    match value {
        ColumnValue::Text(v) => v.clone(),
        ColumnValue::Bool(b) => Some(b.to_string()),
        ColumnValue::Integer(i) => i.map(|i| i.to_string()),
    }
}

fn apply_profile(record: &mut ProfileRecord, column: &str, value: &ColumnValue) {
    match (column, value) {
        ("username", v) => record.username = text(v).unwrap_or_default(),
        ("display_name", v) => record.display_name = text(v),
        ("bio", v) => record.bio = text(v),
        ("avatar", v) => record.avatar = text(v),
        ("background_image", v) => record.background_image = text(v),
        ("logo", v) => record.logo = text(v),
        ("theme", v) => record.theme = text(v),
        ("font_family", v) => record.font_family = text(v),
        ("font_color", v) => record.font_color = text(v),
        ("show_social_icons", ColumnValue::Bool(b)) => record.show_social_icons = Some(*b),
        ("use_infinite_slider", ColumnValue::Bool(b)) => record.use_infinite_slider = Some(*b),
        ("image_layout", v) => record.image_layout = text(v),
        ("grid_columns", ColumnValue::Integer(i)) => record.grid_columns = *i,
        (other, _) => panic!("unexpected profile column {other}"),
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_id(&self, user_id: &str) -> DomainResult<Option<ProfileRecord>> {
        Ok(self.rows.lock().get(user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<ProfileRecord>> {
        Ok(self.rows.lock().values().find(|p| p.username == username).cloned())
    }

    async fn search(&self, query: Option<&str>, limit: usize) -> DomainResult<Vec<ProfileRecord>> {
        let needle = query.map(str::to_lowercase);
        let mut found: Vec<ProfileRecord> = self
            .rows
            .lock()
            .values()
            .filter(|p| match &needle {
                Some(needle) => {
                    p.username.to_lowercase().contains(needle.as_str())
                        || p.display_name.as_deref().unwrap_or_default().to_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        found.truncate(limit);
        Ok(found)
    }

    async fn username_taken(&self, username: &str, user_id: &str) -> DomainResult<bool> {
        Ok(self.rows.lock().values().any(|p| p.username == username && p.id != user_id))
    }

    async fn insert(&self, record: ProfileRecord) -> DomainResult<()> {
        let mut rows = self.rows.lock();
        if rows.contains_key(&record.id) {
            return Ok(());
        }
        if rows.values().any(|p| p.username == record.username) {
            return Err(LinkpageError::Conflict("username already taken".to_string()));
        }
        rows.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(
        &self,
        user_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        let mut rows = self.rows.lock();
        let Some(record) = rows.get_mut(user_id) else {
            return Ok(0);
        };
        for (column, value) in &assignments {
            apply_profile(record, column, value);
        }
        record.updated_at = updated_at;
        Ok(1)
    }
}

// ============================================================================
// Positioned children
// ============================================================================

trait Positioned: Clone {
    fn id(&self) -> &str;
    fn owner(&self) -> &str;
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

impl Positioned for LinkRecord {
    fn id(&self) -> &str {
        &self.id
    }
    fn owner(&self) -> &str {
        &self.user_id
    }
    fn position(&self) -> i64 {
        self.position
    }
    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

impl Positioned for ImageRecord {
    fn id(&self) -> &str {
        &self.id
    }
    fn owner(&self) -> &str {
        &self.user_id
    }
    fn position(&self) -> i64 {
        self.position
    }
    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

fn owned<T: Positioned>(rows: &[T], user_id: &str) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().filter(|r| r.owner() == user_id).cloned().collect();
    out.sort_by_key(Positioned::position);
    out
}

/// Place `record` after its owner's last row unless the owner holds `limit`
fn append<T: Positioned>(rows: &mut Vec<T>, mut record: T, limit: usize) -> Option<i64> {
    let owned: Vec<i64> =
        rows.iter().filter(|r| r.owner() == record.owner()).map(Positioned::position).collect();
    if owned.len() >= limit {
        return None;
    }
    let position = owned.iter().max().map_or(0, |max| max + 1);
    record.set_position(position);
    rows.push(record);
    Some(position)
}

fn delete_and_compact<T: Positioned>(rows: &mut Vec<T>, user_id: &str, id: &str) -> Option<i64> {
    let index = rows.iter().position(|r| r.owner() == user_id && r.id() == id)?;
    let old = rows.remove(index).position();
    for row in rows.iter_mut().filter(|r| r.owner() == user_id) {
        if row.position() > old {
            row.set_position(row.position() - 1);
        }
    }
    Some(old)
}

fn apply_positions<T: Positioned>(rows: &mut [T], user_id: &str, positions: &[(String, i64)]) -> usize {
    let mut affected = 0;
    for (id, position) in positions {
        if let Some(row) = rows.iter_mut().find(|r| r.owner() == user_id && r.id() == id.as_str()) {
            row.set_position(*position);
            affected += 1;
        }
    }
    affected
}

// ============================================================================
// Links
// ============================================================================

#[derive(Default, Clone)]
pub struct MockLinkRepository {
    rows: Arc<Mutex<Vec<LinkRecord>>>,
    pub switch: Arc<WriteSwitch>,
}

impl MockLinkRepository {
    pub fn rows(&self) -> Vec<LinkRecord> {
        self.rows.lock().clone()
    }
}

fn apply_link(record: &mut LinkRecord, column: &str, value: &ColumnValue) {
    let value = text(value);
    match column {
        "title" => record.title = value.unwrap_or_default(),
        "url" => record.url = value.unwrap_or_default(),
        "display_type" => record.display_type = value,
        "icon" => record.icon = value,
        "background_color" => record.background_color = value,
        "text_color" => record.text_color = value,
        "border_radius" => record.border_radius = value,
        "shadow" => record.shadow = value,
        "shadow_color" => record.shadow_color = value,
        other => panic!("unexpected link column {other}"),
    }
}

#[async_trait]
impl LinkRepository for MockLinkRepository {
    async fn list(&self, user_id: &str) -> DomainResult<Vec<LinkRecord>> {
        Ok(owned(&self.rows.lock()[..], user_id))
    }

    async fn find(&self, user_id: &str, link_id: &str) -> DomainResult<Option<LinkRecord>> {
        Ok(self.rows.lock().iter().find(|l| l.user_id == user_id && l.id == link_id).cloned())
    }

    async fn append(&self, record: LinkRecord) -> DomainResult<i64> {
        self.switch.enter().await?;
        Ok(append(&mut self.rows.lock(), record, usize::MAX).unwrap_or_default())
    }

    async fn update(
        &self,
        user_id: &str,
        link_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        self.switch.enter().await?;
        let mut rows = self.rows.lock();
        let Some(record) = rows.iter_mut().find(|l| l.user_id == user_id && l.id == link_id) else {
            return Ok(0);
        };
        for (column, value) in &assignments {
            apply_link(record, column, value);
        }
        record.updated_at = updated_at;
        Ok(1)
    }

    async fn delete_and_compact(&self, user_id: &str, link_id: &str) -> DomainResult<Option<i64>> {
        self.switch.enter().await?;
        Ok(delete_and_compact(&mut *self.rows.lock(), user_id, link_id))
    }

    async fn apply_positions(&self, user_id: &str, positions: &[(String, i64)]) -> DomainResult<usize> {
        self.switch.enter().await?;
        Ok(apply_positions(&mut self.rows.lock()[..], user_id, positions))
    }
}

// ============================================================================
// Images
// ============================================================================

#[derive(Default, Clone)]
pub struct MockImageRepository {
    rows: Arc<Mutex<Vec<ImageRecord>>>,
    pub switch: Arc<WriteSwitch>,
}

impl MockImageRepository {
    pub fn rows(&self) -> Vec<ImageRecord> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl ImageRepository for MockImageRepository {
    async fn list(&self, user_id: &str) -> DomainResult<Vec<ImageRecord>> {
        Ok(owned(&self.rows.lock()[..], user_id))
    }

    async fn find(&self, user_id: &str, image_id: &str) -> DomainResult<Option<ImageRecord>> {
        Ok(self.rows.lock().iter().find(|i| i.user_id == user_id && i.id == image_id).cloned())
    }

    async fn count(&self, user_id: &str) -> DomainResult<usize> {
        Ok(self.rows.lock().iter().filter(|i| i.user_id == user_id).count())
    }

    async fn append(&self, record: ImageRecord, limit: usize) -> DomainResult<Option<i64>> {
        self.switch.enter().await?;
        Ok(append(&mut self.rows.lock(), record, limit))
    }

    async fn update(
        &self,
        user_id: &str,
        image_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> DomainResult<usize> {
        self.switch.enter().await?;
        let mut rows = self.rows.lock();
        let Some(record) = rows.iter_mut().find(|i| i.user_id == user_id && i.id == image_id) else {
            return Ok(0);
        };
        for (column, value) in &assignments {
            match *column {
                "url" => record.url = text(value).unwrap_or_default(),
                "alt" => record.alt = text(value),
                other => panic!("unexpected image column {other}"),
            }
        }
        record.updated_at = updated_at;
        Ok(1)
    }

    async fn delete_and_compact(&self, user_id: &str, image_id: &str) -> DomainResult<Option<i64>> {
        self.switch.enter().await?;
        Ok(delete_and_compact(&mut *self.rows.lock(), user_id, image_id))
    }

    async fn apply_positions(&self, user_id: &str, positions: &[(String, i64)]) -> DomainResult<usize> {
        self.switch.enter().await?;
        Ok(apply_positions(&mut self.rows.lock()[..], user_id, positions))
    }
}
