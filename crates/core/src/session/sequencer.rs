//! Per-resource mutation sequencing
//!
//! Each mutation takes a ticket before its request is sent. When the
//! response arrives it is applied only if its ticket is still the newest one
//! issued for that resource; otherwise a later mutation has overtaken it.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Sequence number for one mutation on one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    resource: String,
    sequence: u64,
}

impl MutationTicket {
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Default)]
pub struct MutationSequencer {
    latest: Mutex<HashMap<String, u64>>,
}

impl MutationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `resource` (e.g. `links:<user id>`)
    pub fn issue(&self, resource: &str) -> MutationTicket {
        let mut latest = self.latest.lock();
        let next = latest.entry(resource.to_string()).or_insert(0);
        *next += 1;
        MutationTicket { resource: resource.to_string(), sequence: *next }
    }

    /// Whether no newer ticket has been issued for the same resource
    pub fn is_latest(&self, ticket: &MutationTicket) -> bool {
        self.latest.lock().get(&ticket.resource).is_some_and(|seq| *seq == ticket.sequence)
    }
}
