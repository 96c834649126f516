//! Authenticated session context
//!
//! A [`Session`] is an explicit value handed to every owner-scoped operation.
//! [`SessionManager`] holds the one signed-in session of an interactive
//! client from sign-in until sign-out.

mod sequencer;

use chrono::{DateTime, Utc};
use linkpage_domain::{LinkpageError, Result};
use parking_lot::RwLock;
use tracing::{debug, info};

pub use sequencer::{MutationSequencer, MutationTicket};

/// Identity of the user an operation acts for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for `user_id`
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the id is empty or whitespace.
    pub fn new(user_id: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into().trim().to_string();
        if user_id.is_empty() {
            return Err(LinkpageError::InvalidInput("user id must not be empty".to_string()));
        }
        Ok(Self { user_id, issued_at: Utc::now() })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

/// Owns the session lifecycle of a single interactive client
#[derive(Debug, Default)]
pub struct SessionManager {
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any previous one
    pub fn sign_in(&self, user_id: &str) -> Result<Session> {
        let session = Session::new(user_id)?;
        let previous = self.current.write().replace(session.clone());
        if let Some(previous) = previous {
            debug!(previous_user = %previous.user_id, "replacing existing session");
        }
        info!(user_id = %session.user_id, "session started");
        Ok(session)
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Current session, or `Unauthorized` when signed out
    pub fn require(&self) -> Result<Session> {
        self.current().ok_or_else(|| LinkpageError::Unauthorized("not signed in".to_string()))
    }

    /// End the session; returns the one that was active
    pub fn sign_out(&self) -> Option<Session> {
        let ended = self.current.write().take();
        if let Some(session) = &ended {
            info!(user_id = %session.user_id, "session ended");
        }
        ended
    }
}
