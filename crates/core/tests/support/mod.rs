//! Shared test helpers for `linkpage-core` integration tests.
//!
//! These helpers wire the gateway to in-memory ports so tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;
pub mod uploads;

use std::sync::Arc;

use linkpage_core::{Notification, Notifier, ProfileGateway, Session};
use parking_lot::Mutex;

pub use repositories::{MockImageRepository, MockLinkRepository, MockProfileRepository};
pub use uploads::{FixedTransform, MemoryBlobStorage};

/// Gateway plus handles on its backing mocks
pub struct Harness {
    pub gateway: Arc<ProfileGateway>,
    pub profiles: MockProfileRepository,
    pub links: MockLinkRepository,
    pub images: MockImageRepository,
}

impl Harness {
    pub fn new() -> Self {
        let profiles = MockProfileRepository::default();
        let links = MockLinkRepository::default();
        let images = MockImageRepository::default();
        let gateway = Arc::new(ProfileGateway::new(
            Arc::new(profiles.clone()),
            Arc::new(links.clone()),
            Arc::new(images.clone()),
        ));
        Self { gateway, profiles, links, images }
    }

    /// Stored link positions of `user_id`, in position order
    pub fn link_positions(&self, user_id: &str) -> Vec<i64> {
        let mut positions: Vec<i64> =
            self.links.rows().iter().filter(|l| l.user_id == user_id).map(|l| l.position).collect();
        positions.sort_unstable();
        positions
    }

    pub fn image_positions(&self, user_id: &str) -> Vec<i64> {
        let mut positions: Vec<i64> =
            self.images.rows().iter().filter(|i| i.user_id == user_id).map(|i| i.position).collect();
        positions.sort_unstable();
        positions
    }
}

pub fn session(user_id: &str) -> Session {
    Session::new(user_id).expect("valid session")
}

/// `{0, 1, .., n-1}` exactly
pub fn assert_dense(positions: &[i64]) {
    let expected: Vec<i64> = (0..positions.len() as i64).collect();
    assert_eq!(positions, expected.as_slice(), "positions must be dense");
}

/// Notifier that records every notification
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message.clone()),
                Notification::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}
