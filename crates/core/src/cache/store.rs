//! In-memory store for the users collection snapshot.
//!
//! The store is the single owner of the snapshot. Writes are applied under the watch
//! channel's lock and every published change wakes all subscribers, so derived views
//! recompute without polling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use super::Snapshot;

/// Captured refresh epoch. A refresh result is only published while its ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Cache for one collection resource.
///
/// Cloning the store yields another handle to the same snapshot.
#[derive(Debug, Clone)]
pub struct CacheStore {
    snapshot: Arc<watch::Sender<Snapshot>>,
    refresh_epoch: Arc<AtomicU64>,
}

impl CacheStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    /// Creates a store holding `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(watch::Sender::new(snapshot)),
            refresh_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the current snapshot.
    pub fn get(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Publishes `snapshot` as the new state.
    pub fn replace(&self, snapshot: Snapshot) {
        tracing::trace!(len = snapshot.len(), "Replacing cache snapshot");
        self.snapshot.send_replace(snapshot);
    }

    /// Derives the next snapshot from the current one and publishes it.
    pub fn transform<F>(&self, f: F)
    where
        F: FnOnce(&Snapshot) -> Snapshot,
    {
        self.snapshot.send_modify(|current| {
            let next = f(current);
            *current = next;
        });
    }

    /// Like [`CacheStore::transform`], but `f` may fail.
    ///
    /// On failure nothing is published and subscribers are not notified.
    pub fn try_transform<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&Snapshot) -> Result<Snapshot, E>,
    {
        let mut outcome = Ok(());
        self.snapshot.send_if_modified(|current| match f(current) {
            Ok(next) => {
                *current = next;
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Captures the refresh epoch before a background fetch starts.
    pub fn refresh_ticket(&self) -> RefreshTicket {
        RefreshTicket(self.refresh_epoch.load(Ordering::SeqCst))
    }

    /// Invalidates every outstanding refresh ticket.
    pub fn cancel_refresh(&self) {
        self.refresh_epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Publishes a refresh result unless it was cancelled after `ticket` was taken.
    ///
    /// Returns true when the snapshot was published.
    pub fn replace_if_current(&self, ticket: RefreshTicket, snapshot: Snapshot) -> bool {
        let epoch = &self.refresh_epoch;
        self.snapshot.send_if_modified(move |current| {
            if epoch.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            *current = snapshot;
            true
        })
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
