//! Mutation coordinator for the users cache.
//!
//! Every mutation runs the same lifecycle:
//!
//! 1. Check preconditions (identity rules) without touching the cache.
//! 2. Cancel outstanding refreshes so a stale fetch cannot overwrite the optimistic state.
//! 3. Capture the current snapshot and apply the optimistic change in one step.
//! 4. Issue the remote call.
//! 5. Reconcile with the authoritative result, or restore the captured snapshot.
//!
//! Steps 1-3 run synchronously in [`MutationCoordinator::begin`], so the optimistic
//! state is visible before the remote call is dispatched by
//! [`MutationCoordinator::settle`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::cache::{CacheStore, Snapshot};
use crate::remote::{RemoteError, UserRemote};
use crate::user::User;

use super::apply::{apply_confirmed, apply_optimistic};
use super::types::PlannedMutation;
use super::{
    MutationBoard, MutationError, MutationKind, MutationOutcome, MutationPhase, MutationRequest,
    PendingMutation, Result,
};

/// Result of a background collection refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched collection was published.
    Applied(usize),
    /// A mutation began while the fetch was in flight; the result was discarded.
    Superseded,
}

/// Sole writer of a users [`CacheStore`].
#[derive(Debug)]
pub struct MutationCoordinator<R> {
    store: CacheStore,
    remote: Arc<R>,
    board: Arc<watch::Sender<MutationBoard>>,
}

impl<R> Clone for MutationCoordinator<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            remote: Arc::clone(&self.remote),
            board: Arc::clone(&self.board),
        }
    }
}

impl<R: UserRemote> MutationCoordinator<R> {
    /// Creates a coordinator writing to `store` and talking to `remote`.
    pub fn new(store: CacheStore, remote: Arc<R>) -> Self {
        Self {
            store,
            remote,
            board: Arc::new(watch::Sender::new(MutationBoard::default())),
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    /// Current in-flight/error state per mutation kind.
    pub fn status(&self) -> MutationBoard {
        self.board.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<MutationBoard> {
        self.board.subscribe()
    }

    /// Fetches the whole collection and publishes it.
    ///
    /// The result is discarded if a mutation begins while the fetch is in flight.
    pub async fn refresh(&self) -> std::result::Result<RefreshOutcome, RemoteError> {
        let ticket = self.store.refresh_ticket();

        let users = self.remote.fetch_all().await.inspect_err(|err| {
            tracing::warn!(error = %err, "Failed to refresh users");
        })?;

        let count = users.len();
        if self.store.replace_if_current(ticket, Snapshot::new(users)) {
            tracing::debug!(count, "Users refreshed");
            Ok(RefreshOutcome::Applied(count))
        } else {
            tracing::debug!(count, "Discarding refresh superseded by a mutation");
            Ok(RefreshOutcome::Superseded)
        }
    }

    /// Checks preconditions and applies the optimistic change.
    ///
    /// Nothing is touched when a precondition fails. On success the returned
    /// [`PendingMutation`] must be passed to [`MutationCoordinator::settle`].
    pub fn begin(&self, request: MutationRequest) -> Result<PendingMutation> {
        let planned = PlannedMutation::plan(request).inspect_err(|err| {
            tracing::warn!(error = %err, "Rejected mutation");
        })?;
        let kind = planned.kind();

        self.store.cancel_refresh();

        let mut previous = Snapshot::default();
        self.store.transform(|current| {
            previous = current.clone();
            apply_optimistic(current, &planned)
        });

        let mut pending = PendingMutation::new(planned, previous);
        pending.advance(MutationPhase::OptimisticApplied);

        self.board.send_modify(|board| {
            let status = board.get_mut(kind);
            status.in_flight += 1;
            status.last_error = None;
        });

        tracing::debug!(%kind, target = ?pending.target(), "Applied optimistic mutation");
        Ok(pending)
    }

    /// Issues the remote call and reconciles or rolls back.
    pub async fn settle(&self, mut pending: PendingMutation) -> Result<MutationOutcome> {
        let kind = pending.kind();

        let result = match pending.planned() {
            PlannedMutation::Create { user, .. } => {
                self.remote.create(user).await.map(MutationOutcome::Created)
            }
            PlannedMutation::Update { user, .. } => {
                self.remote.update(user).await.map(MutationOutcome::Updated)
            }
            PlannedMutation::Delete { id, .. } => {
                let id = *id;
                self.remote.delete(id).await.map(|()| MutationOutcome::Deleted(id))
            }
        };

        match result {
            Ok(outcome) => {
                self.store
                    .transform(|current| apply_confirmed(current, pending.planned(), &outcome));
                pending.advance(MutationPhase::Reconciled);
                self.finish(kind, None);

                tracing::debug!(%kind, target = ?pending.target(), "Reconciled mutation");
                Ok(outcome)
            }
            Err(source) => {
                self.store.replace(pending.previous().clone());
                pending.advance(MutationPhase::RolledBack);
                self.finish(kind, Some(source.to_string()));

                tracing::warn!(%kind, target = ?pending.target(), error = %source, "Mutation failed, rolled back");
                Err(MutationError::Transport { kind, source })
            }
        }
    }

    /// Creates `user`, which must not have an id yet.
    pub async fn create(&self, user: User) -> Result<MutationOutcome> {
        let pending = self.begin(MutationRequest::Create(user))?;
        self.settle(pending).await
    }

    /// Replaces the user with the same id.
    pub async fn update(&self, user: User) -> Result<MutationOutcome> {
        let pending = self.begin(MutationRequest::Update(user))?;
        self.settle(pending).await
    }

    /// Deletes `user`, which must have an id.
    pub async fn delete(&self, user: User) -> Result<MutationOutcome> {
        let pending = self.begin(MutationRequest::Delete(user))?;
        self.settle(pending).await
    }

    fn finish(&self, kind: MutationKind, error: Option<String>) {
        self.board.send_modify(|board| {
            let status = board.get_mut(kind);
            status.in_flight = status.in_flight.saturating_sub(1);
            if error.is_some() {
                status.last_error = error;
            }
        });
    }
}
