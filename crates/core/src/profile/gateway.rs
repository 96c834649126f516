//! Profile/link data gateway - core business logic
//!
//! Translates storage records into the profile view model and issues point
//! mutations. Owns the position invariant: after any add, delete or reorder
//! the links of a profile sit at positions `0..n-1`, and so do its images.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use linkpage_domain::constants::{DISCOVER_DEFAULT_LIMIT, DISCOVER_MAX_LIMIT, MAX_SLIDER_IMAGES};
use linkpage_domain::{
    normalize_username, GridColumns, Image, ImageLayout, ImagePatch, ImageRecord, Link,
    LinkPatch, LinkRecord, LinkpageError, NewImage, NewLink, Profile, ProfileCard, ProfilePatch,
    ProfileRecord, Result,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::ports::{ImageRepository, LinkRepository, ProfileRepository};
use crate::session::Session;
use crate::validation;

fn now() -> i64 {
    Utc::now().timestamp()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

const PROVISION_RETRIES: usize = 3;

fn username_suffix() -> String {
    let mut bytes = [0u8; 3];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `ordered` must name every current id exactly once
fn ensure_permutation(current: &[String], ordered: &[String], entity: &str) -> Result<()> {
    let wanted: HashSet<&str> = ordered.iter().map(String::as_str).collect();
    let existing: HashSet<&str> = current.iter().map(String::as_str).collect();

    if ordered.len() != current.len() || wanted.len() != ordered.len() || wanted != existing {
        return Err(LinkpageError::InvalidInput(format!(
            "{entity} order must list each of the {} current {entity}s exactly once",
            current.len()
        )));
    }
    Ok(())
}

fn positions_for(ordered: &[String]) -> Vec<(String, i64)> {
    ordered.iter().zip(0_i64..).map(|(id, position)| (id.clone(), position)).collect()
}

/// Single source of truth for profile, link and image reads and writes
pub struct ProfileGateway {
    profiles: Arc<dyn ProfileRepository>,
    links: Arc<dyn LinkRepository>,
    images: Arc<dyn ImageRepository>,
}

impl ProfileGateway {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        links: Arc<dyn LinkRepository>,
        images: Arc<dyn ImageRepository>,
    ) -> Self {
        Self { profiles, links, images }
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Fetch the session's profile, provisioning a placeholder on first access
    pub async fn get_or_create_profile(&self, session: &Session) -> Result<Profile> {
        let user_id = session.user_id();

        let record = match self.profiles.find_by_id(user_id).await? {
            Some(record) => record,
            None => self.provision(user_id).await?,
        };

        self.assemble(record).await
    }

    /// Insert the placeholder profile, moving to a suffixed username while
    /// the default one belongs to someone else
    async fn provision(&self, user_id: &str) -> Result<ProfileRecord> {
        let mut record = ProfileRecord::provisioned(user_id, now());
        let base = record.username.clone();

        for attempt in 0..=PROVISION_RETRIES {
            if attempt > 0 {
                record.username = format!("{base}_{}", username_suffix());
            }
            info!(user_id, username = %record.username, attempt, "provisioning profile");

            match self.profiles.insert(record.clone()).await {
                Ok(()) => {
                    return self.profiles.find_by_id(user_id).await?.ok_or_else(|| {
                        LinkpageError::Internal(format!("profile {user_id} missing after insert"))
                    });
                }
                Err(LinkpageError::Conflict(reason)) if attempt < PROVISION_RETRIES => {
                    // A concurrent first visit of the same user may have won the insert
                    if let Some(existing) = self.profiles.find_by_id(user_id).await? {
                        return Ok(existing);
                    }
                    warn!(user_id, username = %record.username, %reason, "provisioned username taken");
                }
                Err(err) => {
                    error!(user_id, error = %err, "failed to provision profile");
                    return Err(err);
                }
            }
        }

        Err(LinkpageError::Conflict(format!("no free username for {user_id}")))
    }

    /// Public lookup; `Ok(None)` when no profile has this username
    pub async fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let username = normalize_username(username);
        if username.is_empty() {
            return Ok(None);
        }

        match self.profiles.find_by_username(&username).await? {
            Some(record) => self.assemble(record).await.map(Some),
            None => {
                debug!(%username, "profile not found");
                Ok(None)
            }
        }
    }

    /// Public discovery listing, newest first
    ///
    /// `limit` defaults to 30 and is clamped to `1..=50`.
    pub async fn discover_profiles(
        &self,
        query: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ProfileCard>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let limit = limit.unwrap_or(DISCOVER_DEFAULT_LIMIT).clamp(1, DISCOVER_MAX_LIMIT);

        let records = self.profiles.search(query, limit).await?;
        debug!(?query, limit, found = records.len(), "profiles discovered");
        Ok(records.into_iter().map(ProfileCard::from).collect())
    }

    /// Write the provided fields, then return the complete refreshed profile
    pub async fn update_profile(&self, session: &Session, patch: ProfilePatch) -> Result<Profile> {
        let user_id = session.user_id();
        validation::validate_profile_patch(&patch)?;

        if let Some(username) = patch.username.as_deref().map(normalize_username) {
            if self.profiles.username_taken(&username, user_id).await? {
                warn!(user_id, %username, "username already taken");
                return Err(LinkpageError::Conflict(format!("username '{username}' is taken")));
            }
        }

        let assignments = patch.assignments();
        if !assignments.is_empty() {
            let affected = self.profiles.update(user_id, assignments, now()).await.inspect_err(
                |err| error!(user_id, error = %err, "failed to update profile"),
            )?;
            if affected == 0 {
                warn!(user_id, "profile update matched no rows");
                return Err(LinkpageError::Unauthorized(format!("profile {user_id}")));
            }
        }

        let record = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| LinkpageError::NotFound(format!("profile {user_id}")))?;
        self.assemble(record).await
    }

    pub async fn set_infinite_slider(&self, session: &Session, enabled: bool) -> Result<Profile> {
        let patch = ProfilePatch { use_infinite_slider: Some(enabled), ..ProfilePatch::default() };
        self.update_profile(session, patch).await
    }

    /// Change the slider layout; the column count is only stored for grids
    pub async fn set_image_layout(
        &self,
        session: &Session,
        layout: ImageLayout,
        columns: Option<GridColumns>,
    ) -> Result<Profile> {
        let grid_columns = match layout {
            ImageLayout::Grid => Some(columns.unwrap_or_default()),
            ImageLayout::Row | ImageLayout::Column => None,
        };
        let patch =
            ProfilePatch { image_layout: Some(layout), grid_columns, ..ProfilePatch::default() };
        self.update_profile(session, patch).await
    }

    async fn assemble(&self, record: ProfileRecord) -> Result<Profile> {
        let (links, images) =
            tokio::try_join!(self.links.list(&record.id), self.images.list(&record.id))?;
        Ok(Profile::assemble(record, links, images))
    }

    // ========================================================================
    // Links
    // ========================================================================

    pub async fn list_links(&self, session: &Session) -> Result<Vec<Link>> {
        let records = self.links.list(session.user_id()).await?;
        Ok(records.into_iter().map(Link::from).collect())
    }

    /// Append a link after the current last position
    ///
    /// The storage layer assigns the position atomically.
    pub async fn add_link(&self, session: &Session, link: NewLink) -> Result<Link> {
        let user_id = session.user_id();
        validation::validate_new_link(&link)?;

        let timestamp = now();
        let mut record = LinkRecord {
            id: new_id(),
            user_id: user_id.to_string(),
            title: link.title.trim().to_string(),
            url: link.url.trim().to_string(),
            display_type: link.display_type.map(|d| d.as_str().to_string()),
            icon: link.icon.filter(|i| !i.trim().is_empty()),
            background_color: None,
            text_color: None,
            border_radius: None,
            shadow: None,
            shadow_color: None,
            position: 0,
            created_at: timestamp,
            updated_at: timestamp,
        };

        let position = self
            .links
            .append(record.clone())
            .await
            .inspect_err(|err| error!(user_id, error = %err, "failed to add link"))?;
        record.position = position;
        info!(user_id, link_id = %record.id, position, "link added");
        Ok(Link::from(record))
    }

    /// Update an owned link; a link owned by someone else is `Unauthorized`
    pub async fn update_link(&self, session: &Session, link_id: &str, patch: LinkPatch) -> Result<Link> {
        let user_id = session.user_id();
        validation::validate_link_patch(&patch)?;

        let assignments = patch.assignments();
        if !assignments.is_empty() {
            let affected = self
                .links
                .update(user_id, link_id, assignments, now())
                .await
                .inspect_err(|err| error!(user_id, link_id, error = %err, "failed to update link"))?;
            if affected == 0 {
                warn!(user_id, link_id, "link update matched no owned row");
                return Err(LinkpageError::Unauthorized(format!("link {link_id}")));
            }
        }

        self.links
            .find(user_id, link_id)
            .await?
            .map(Link::from)
            .ok_or_else(|| LinkpageError::Unauthorized(format!("link {link_id}")))
    }

    /// Delete an owned link and close the gap in positions
    pub async fn delete_link(&self, session: &Session, link_id: &str) -> Result<()> {
        let user_id = session.user_id();
        match self.links.delete_and_compact(user_id, link_id).await? {
            Some(position) => {
                info!(user_id, link_id, position, "link deleted");
                Ok(())
            }
            None => {
                warn!(user_id, link_id, "link delete matched no owned row");
                Err(LinkpageError::Unauthorized(format!("link {link_id}")))
            }
        }
    }

    /// Persist `ordered` as the new link order and return the stored order
    pub async fn reorder_links(&self, session: &Session, ordered: &[String]) -> Result<Vec<Link>> {
        let user_id = session.user_id();
        let current: Vec<String> =
            self.links.list(user_id).await?.into_iter().map(|l| l.id).collect();
        ensure_permutation(&current, ordered, "link")?;

        let positions = positions_for(ordered);
        let affected = self
            .links
            .apply_positions(user_id, &positions)
            .await
            .inspect_err(|err| error!(user_id, error = %err, "failed to reorder links"))?;
        if affected != positions.len() {
            return Err(LinkpageError::Unauthorized(format!(
                "reorder touched {affected} of {} links",
                positions.len()
            )));
        }

        debug!(user_id, count = positions.len(), "links reordered");
        self.list_links(session).await
    }

    // ========================================================================
    // Slider images
    // ========================================================================

    pub async fn list_images(&self, session: &Session) -> Result<Vec<Image>> {
        let records = self.images.list(session.user_id()).await?;
        Ok(records.into_iter().map(Image::from).collect())
    }

    /// Whether another slider image may be added
    pub async fn can_add_image(&self, session: &Session) -> Result<bool> {
        Ok(self.images.count(session.user_id()).await? < MAX_SLIDER_IMAGES)
    }

    /// Append a slider image; refused once the profile holds the maximum
    pub async fn add_image(&self, session: &Session, image: NewImage) -> Result<Image> {
        let user_id = session.user_id();
        validation::validate_new_image(&image)?;

        let timestamp = now();
        let mut record = ImageRecord {
            id: new_id(),
            user_id: user_id.to_string(),
            url: image.url.trim().to_string(),
            alt: Some(image.alt.unwrap_or_default()),
            position: 0,
            created_at: timestamp,
            updated_at: timestamp,
        };

        let position = self
            .images
            .append(record.clone(), MAX_SLIDER_IMAGES)
            .await
            .inspect_err(|err| error!(user_id, error = %err, "failed to add image"))?
            .ok_or_else(|| {
                LinkpageError::InvalidInput(format!(
                    "a profile holds at most {MAX_SLIDER_IMAGES} slider images"
                ))
            })?;
        record.position = position;
        info!(user_id, image_id = %record.id, position, "image added");
        Ok(Image::from(record))
    }

    pub async fn update_image(&self, session: &Session, image_id: &str, patch: ImagePatch) -> Result<Image> {
        let user_id = session.user_id();
        if let Some(url) = &patch.url {
            validation::validate_new_image(&NewImage { url: url.clone(), alt: None })?;
        }

        if !patch.is_empty() {
            let affected = self.images.update(user_id, image_id, patch.assignments(), now()).await?;
            if affected == 0 {
                return Err(LinkpageError::Unauthorized(format!("image {image_id}")));
            }
        }

        self.images
            .find(user_id, image_id)
            .await?
            .map(Image::from)
            .ok_or_else(|| LinkpageError::Unauthorized(format!("image {image_id}")))
    }

    pub async fn delete_image(&self, session: &Session, image_id: &str) -> Result<()> {
        let user_id = session.user_id();
        match self.images.delete_and_compact(user_id, image_id).await? {
            Some(position) => {
                info!(user_id, image_id, position, "image deleted");
                Ok(())
            }
            None => {
                warn!(user_id, image_id, "image delete matched no owned row");
                Err(LinkpageError::Unauthorized(format!("image {image_id}")))
            }
        }
    }

    pub async fn reorder_images(&self, session: &Session, ordered: &[String]) -> Result<Vec<Image>> {
        let user_id = session.user_id();
        let current: Vec<String> =
            self.images.list(user_id).await?.into_iter().map(|i| i.id).collect();
        ensure_permutation(&current, ordered, "image")?;

        let positions = positions_for(ordered);
        let affected = self
            .images
            .apply_positions(user_id, &positions)
            .await
            .inspect_err(|err| error!(user_id, error = %err, "failed to reorder images"))?;
        if affected != positions.len() {
            return Err(LinkpageError::Unauthorized(format!(
                "reorder touched {affected} of {} images",
                positions.len()
            )));
        }

        self.list_images(session).await
    }
}
