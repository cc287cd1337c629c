//! In-memory store of live builder sessions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::builder::selection::SelectionState;

struct SessionEntry {
    selection: SelectionState,
    last_active: Instant,
}

/// Thread-safe map of session id to selection state.
///
/// Each session is owned by one interactive client; the map exists so the
/// HTTP layer can route concurrent clients to their own states, not to share
/// one state between actors. Every read or mutation refreshes the session's
/// activity timestamp; abandoned sessions are reaped by `prune_idle`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty builder session.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.insert(
            id,
            SessionEntry {
                selection: SelectionState::new(),
                last_active: Instant::now(),
            },
        );
        id
    }

    /// Snapshot one session's selection, refreshing its activity timestamp.
    pub fn get(&self, id: Uuid) -> Option<SelectionState> {
        self.inner.get_mut(&id).map(|mut entry| {
            entry.last_active = Instant::now();
            entry.selection.clone()
        })
    }

    /// Run a mutation against one session while holding its entry lock.
    ///
    /// Returns `None` if the session does not exist.
    pub fn with_mut<T>(&self, id: Uuid, f: impl FnOnce(&mut SelectionState) -> T) -> Option<T> {
        self.inner.get_mut(&id).map(|mut entry| {
            entry.last_active = Instant::now();
            f(&mut entry.selection)
        })
    }

    /// Close a session, dropping its selection.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner.remove(&id).is_some()
    }

    /// Drop every session idle for `max_idle` or longer; returns how many
    /// were removed.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let before = self.inner.len();
        self.inner
            .retain(|_, entry| entry.last_active.elapsed() < max_idle);
        before - self.inner.len()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot of every open session, for the admin surface.
    pub fn snapshot(&self) -> Vec<(Uuid, SelectionState)> {
        self.inner
            .iter()
            .map(|r| (*r.key(), r.value().selection.clone()))
            .collect()
    }
}
