//! Drag-and-drop reorder coordination
//!
//! Turns a drag gesture `(from, to)` into a persisted order with an
//! optimistic update: the new order is visible before the write starts and
//! is either confirmed by the server's order or rolled back to the snapshot.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use linkpage_domain::Result;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Move the element at `from` so it ends up at index `to`
///
/// Out-of-range indices leave the list unchanged.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from >= list.len() || to >= list.len() || from == to {
        return;
    }
    let item = list.remove(from);
    list.insert(to, item);
}

/// Result of a reorder request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome<T> {
    /// Same index or out of range; nothing persisted
    Unchanged,
    /// Another reorder is still in flight; nothing touched
    Busy,
    /// Persisted; holds the server-confirmed order now in state
    Applied(Vec<T>),
    /// Persisted, but a newer mutation owns the state so the response was
    /// dropped
    Superseded,
}

/// Serializes reorders of one list: at most one in flight
#[derive(Debug, Default)]
pub struct ReorderCoordinator {
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReorderCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Optimistically move `from` to `to` in `state` and persist it
    ///
    /// On failure `state` is restored to its pre-drag contents and the error
    /// is returned for the caller to surface. There is no retry.
    pub async fn reorder<T, F, Fut>(
        &self,
        state: &Mutex<Vec<T>>,
        from: usize,
        to: usize,
        persist: F,
    ) -> Result<ReorderOutcome<T>>
    where
        T: Clone,
        F: FnOnce(Vec<T>) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        self.reorder_guarded(state, from, to, || (), persist, |_: &()| true).await
    }

    /// Like [`reorder`](Self::reorder), but state is only written back after
    /// the write while `still_current` holds
    ///
    /// `start` runs once the reorder is accepted (not busy, indices in
    /// range) and before the optimistic move; its token is handed to
    /// `still_current`. A superseded response is dropped on success and the
    /// snapshot is not restored on failure.
    pub async fn reorder_guarded<T, K, S, F, Fut, C>(
        &self,
        state: &Mutex<Vec<T>>,
        from: usize,
        to: usize,
        start: S,
        persist: F,
        still_current: C,
    ) -> Result<ReorderOutcome<T>>
    where
        T: Clone,
        S: FnOnce() -> K,
        F: FnOnce(Vec<T>) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
        C: FnOnce(&K) -> bool,
    {
        if from == to {
            return Ok(ReorderOutcome::Unchanged);
        }
        if self.in_flight.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            debug!("reorder already in flight");
            return Ok(ReorderOutcome::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        let (token, snapshot, optimistic) = {
            let mut list = state.lock();
            if from >= list.len() || to >= list.len() {
                return Ok(ReorderOutcome::Unchanged);
            }
            let token = start();
            let snapshot = list.clone();
            move_item(&mut *list, from, to);
            (token, snapshot, list.clone())
        };

        let result = persist(optimistic).await;
        let current = still_current(&token);

        match result {
            Ok(confirmed) if current => {
                *state.lock() = confirmed.clone();
                Ok(ReorderOutcome::Applied(confirmed))
            }
            Ok(_) => {
                debug!("reorder response superseded by a newer mutation");
                Ok(ReorderOutcome::Superseded)
            }
            Err(err) if current => {
                warn!(error = %err, from, to, "reorder failed, rolling back");
                *state.lock() = snapshot;
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, from, to, "reorder failed after a newer mutation, keeping state");
                Err(err)
            }
        }
    }
}
