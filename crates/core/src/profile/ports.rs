//! Port interfaces for profile, link and image persistence
//!
//! These traits define the boundaries between the gateway and the record
//! store. Every child-row method is scoped by the owning `user_id`; a call
//! that matches no row reports it through its return value instead of
//! failing, and the gateway decides what that means.

use async_trait::async_trait;
use linkpage_domain::{Assignments, ImageRecord, LinkRecord, ProfileRecord, Result};

/// Persistence of `profiles` rows
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get a profile by owner id
    async fn find_by_id(&self, user_id: &str) -> Result<Option<ProfileRecord>>;

    /// Get a profile by its (already lowercase) username
    async fn find_by_username(&self, username: &str) -> Result<Option<ProfileRecord>>;

    /// Newest profiles first, at most `limit` of them
    ///
    /// With a `query`, only profiles whose username or display name contains
    /// it (case-insensitively) are returned.
    async fn search(&self, query: Option<&str>, limit: usize) -> Result<Vec<ProfileRecord>>;

    /// Whether `username` belongs to a profile other than `user_id`
    async fn username_taken(&self, username: &str, user_id: &str) -> Result<bool>;

    /// Insert a new profile row
    ///
    /// A duplicate id is ignored so two first visits racing each other
    /// both end up reading the same row.
    async fn insert(&self, record: ProfileRecord) -> Result<()>;

    /// Apply column writes; returns the number of rows affected
    async fn update(&self, user_id: &str, assignments: Assignments, updated_at: i64)
        -> Result<usize>;
}

/// Persistence of `links` rows
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// All links of an owner ordered by position ascending
    async fn list(&self, user_id: &str) -> Result<Vec<LinkRecord>>;

    async fn find(&self, user_id: &str, link_id: &str) -> Result<Option<LinkRecord>>;

    /// Insert `record` after the owner's current last link.
    ///
    /// The position is computed and written in one atomic step, so
    /// concurrent appends for one owner never share a slot.
    /// `record.position` is ignored; the assigned position is returned.
    async fn append(&self, record: LinkRecord) -> Result<i64>;

    /// Apply column writes to one owned link; returns rows affected
    async fn update(
        &self,
        user_id: &str,
        link_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> Result<usize>;

    /// Delete one owned link and shift every later link down by one.
    ///
    /// Runs atomically. Returns the deleted position, `None` when nothing
    /// matched.
    async fn delete_and_compact(&self, user_id: &str, link_id: &str) -> Result<Option<i64>>;

    /// Write `(id, position)` pairs all-or-nothing; returns rows affected
    async fn apply_positions(&self, user_id: &str, positions: &[(String, i64)]) -> Result<usize>;
}

/// Persistence of `images` rows
///
/// Same contract as [`LinkRepository`] over an independent position sequence.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<Vec<ImageRecord>>;

    async fn find(&self, user_id: &str, image_id: &str) -> Result<Option<ImageRecord>>;

    async fn count(&self, user_id: &str) -> Result<usize>;

    /// Append like [`LinkRepository::append`], but only while the owner
    /// holds fewer than `limit` images. `None` when the limit was reached.
    async fn append(&self, record: ImageRecord, limit: usize) -> Result<Option<i64>>;

    async fn update(
        &self,
        user_id: &str,
        image_id: &str,
        assignments: Assignments,
        updated_at: i64,
    ) -> Result<usize>;

    async fn delete_and_compact(&self, user_id: &str, image_id: &str) -> Result<Option<i64>>;

    async fn apply_positions(&self, user_id: &str, positions: &[(String, i64)]) -> Result<usize>;
}
