//! Dashboard editor state
//!
//! Holds one signed-in user's view model and drives gateway calls for the
//! presentation layer. Validation failures are returned before any call is
//! made. Gateway failures are logged, sent to the [`Notifier`] and leave the
//! last known good state in place (reorders roll back).
//!
//! Adds, deletes and drags of one list share a ticket sequence; a response
//! that is no longer the latest is dropped and the list is re-read from the
//! gateway instead, so local state never misses a row that was persisted.
//! Field edits are sequenced per link and patch their row in place.

use std::sync::Arc;

use linkpage_domain::{Image, Link, LinkPatch, LinkpageError, Profile, ProfilePatch, Result};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::profile::ProfileGateway;
use crate::reorder::{ReorderCoordinator, ReorderOutcome};
use crate::session::{MutationSequencer, MutationTicket, Session, SessionManager};
use crate::validation::LinkDraft;

/// User-facing message emitted by the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Toast sink of the presentation layer
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub struct DashboardEditor {
    gateway: Arc<ProfileGateway>,
    notifier: Arc<dyn Notifier>,
    session: Session,
    sequencer: MutationSequencer,
    link_reorder: ReorderCoordinator,
    image_reorder: ReorderCoordinator,
    profile: Mutex<Option<Profile>>,
    links: Mutex<Vec<Link>>,
    images: Mutex<Vec<Image>>,
}

impl DashboardEditor {
    pub fn new(gateway: Arc<ProfileGateway>, notifier: Arc<dyn Notifier>, session: Session) -> Self {
        Self {
            gateway,
            notifier,
            session,
            sequencer: MutationSequencer::new(),
            link_reorder: ReorderCoordinator::new(),
            image_reorder: ReorderCoordinator::new(),
            profile: Mutex::new(None),
            links: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
        }
    }

    /// Editor for the client's signed-in user
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in.
    pub fn for_signed_in(
        gateway: Arc<ProfileGateway>,
        notifier: Arc<dyn Notifier>,
        sessions: &SessionManager,
    ) -> Result<Self> {
        Ok(Self::new(gateway, notifier, sessions.require()?))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current view model with the live link and image lists
    pub fn snapshot(&self) -> Option<Profile> {
        let mut profile = self.profile.lock().clone()?;
        profile.links = self.links.lock().clone();
        profile.images = self.images.lock().clone();
        Some(profile)
    }

    pub fn links(&self) -> Vec<Link> {
        self.links.lock().clone()
    }

    pub fn images(&self) -> Vec<Image> {
        self.images.lock().clone()
    }

    fn resource(&self, kind: &str) -> String {
        format!("{kind}:{}", self.session.user_id())
    }

    fn fail<T>(&self, action: &str, err: LinkpageError) -> Result<T> {
        error!(user_id = %self.session.user_id(), action, error = %err, "editor action failed");
        self.notifier.notify(Notification::Error(format!("Failed to {action}: {err}")));
        Err(err)
    }

    fn is_latest(&self, ticket: &MutationTicket) -> bool {
        let latest = self.sequencer.is_latest(ticket);
        if !latest {
            debug!(resource = ticket.resource(), sequence = ticket.sequence(), "discarding stale response");
        }
        latest
    }

    fn store(&self, profile: &Profile) {
        *self.links.lock() = profile.links.clone();
        *self.images.lock() = profile.images.clone();
        *self.profile.lock() = Some(profile.clone());
    }

    /// Re-read the link list unless a newer list mutation owns it by then
    async fn refresh_links(&self) {
        let ticket = self.sequencer.issue(&self.resource("links"));
        match self.gateway.list_links(&self.session).await {
            Ok(links) if self.is_latest(&ticket) => *self.links.lock() = links,
            Ok(_) => {}
            Err(err) => warn!(user_id = %self.session.user_id(), error = %err, "failed to refresh links"),
        }
    }

    async fn refresh_images(&self) {
        let ticket = self.sequencer.issue(&self.resource("images"));
        match self.gateway.list_images(&self.session).await {
            Ok(images) if self.is_latest(&ticket) => *self.images.lock() = images,
            Ok(_) => {}
            Err(err) => warn!(user_id = %self.session.user_id(), error = %err, "failed to refresh images"),
        }
    }

    /// Load (or provision) the profile and replace all local state
    pub async fn load(&self) -> Result<Profile> {
        match self.gateway.get_or_create_profile(&self.session).await {
            Ok(profile) => {
                self.store(&profile);
                Ok(profile)
            }
            Err(err) => self.fail("load profile", err),
        }
    }

    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<Profile> {
        let ticket = self.sequencer.issue(&self.resource("profile"));
        match self.gateway.update_profile(&self.session, patch).await {
            Ok(profile) => {
                if self.is_latest(&ticket) {
                    *self.profile.lock() = Some(profile.clone());
                }
                self.notifier.notify(Notification::Success("Profile updated".to_string()));
                Ok(profile)
            }
            Err(err @ LinkpageError::Validation(_)) => Err(err),
            Err(err) => self.fail("update profile", err),
        }
    }

    /// Validate the form, then append the link
    pub async fn add_link(&self, draft: LinkDraft) -> Result<Link> {
        let new_link = draft.into_new_link()?;
        let ticket = self.sequencer.issue(&self.resource("links"));

        match self.gateway.add_link(&self.session, new_link).await {
            Ok(link) => {
                if self.is_latest(&ticket) {
                    self.links.lock().push(link.clone());
                } else {
                    self.refresh_links().await;
                }
                Ok(link)
            }
            Err(err) => self.fail("add link", err),
        }
    }

    pub async fn edit_link(&self, link_id: &str, patch: LinkPatch) -> Result<Link> {
        crate::validation::validate_link_patch(&patch)?;
        let ticket = self.sequencer.issue(&format!("link:{link_id}"));

        match self.gateway.update_link(&self.session, link_id, patch).await {
            Ok(link) => {
                if self.is_latest(&ticket) {
                    if let Some(slot) = self.links.lock().iter_mut().find(|l| l.id == link.id) {
                        *slot = link.clone();
                    }
                }
                Ok(link)
            }
            Err(err) => self.fail("update link", err),
        }
    }

    /// Delete a link; the refreshed list carries the renumbered positions
    pub async fn delete_link(&self, link_id: &str) -> Result<()> {
        let ticket = self.sequencer.issue(&self.resource("links"));

        let result = match self.gateway.delete_link(&self.session, link_id).await {
            Ok(()) => self.gateway.list_links(&self.session).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(links) => {
                if self.is_latest(&ticket) {
                    *self.links.lock() = links;
                } else {
                    self.refresh_links().await;
                }
                Ok(())
            }
            Err(err) => self.fail("delete link", err),
        }
    }

    /// Drag a link from one index to another
    ///
    /// A failed or superseded drag re-reads the list afterwards.
    pub async fn drag_link(&self, from: usize, to: usize) -> Result<ReorderOutcome<Link>> {
        let resource = self.resource("links");
        let gateway = Arc::clone(&self.gateway);
        let session = &self.session;

        let outcome = self
            .link_reorder
            .reorder_guarded(
                &self.links,
                from,
                to,
                || self.sequencer.issue(&resource),
                |ordered| async move {
                    let ids: Vec<String> = ordered.into_iter().map(|l| l.id).collect();
                    gateway.reorder_links(session, &ids).await
                },
                |ticket| self.is_latest(ticket),
            )
            .await;

        match outcome {
            Ok(ReorderOutcome::Superseded) => {
                self.refresh_links().await;
                Ok(ReorderOutcome::Superseded)
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let result = self.fail("reorder links", err);
                self.refresh_links().await;
                result
            }
        }
    }

    /// Drag a slider image from one index to another
    pub async fn drag_image(&self, from: usize, to: usize) -> Result<ReorderOutcome<Image>> {
        let resource = self.resource("images");
        let gateway = Arc::clone(&self.gateway);
        let session = &self.session;

        let outcome = self
            .image_reorder
            .reorder_guarded(
                &self.images,
                from,
                to,
                || self.sequencer.issue(&resource),
                |ordered| async move {
                    let ids: Vec<String> = ordered.into_iter().map(|i| i.id).collect();
                    gateway.reorder_images(session, &ids).await
                },
                |ticket| self.is_latest(ticket),
            )
            .await;

        match outcome {
            Ok(ReorderOutcome::Superseded) => {
                self.refresh_images().await;
                Ok(ReorderOutcome::Superseded)
            }
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let result = self.fail("reorder images", err);
                self.refresh_images().await;
                result
            }
        }
    }
}
