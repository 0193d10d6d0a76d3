use std::fmt;

use serde::Serialize;

use crate::cache::{PlaceholderId, Snapshot};
use crate::user::{User, UserId};

use super::MutationError;

/// The kinds of mutation the coordinator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [MutationKind::Create, MutationKind::Update, MutationKind::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    /// Persist a new user; must not carry an id.
    Create(User),
    /// Replace the user with the same id.
    Update(User),
    /// Remove the user with the same id.
    Delete(User),
}

impl MutationRequest {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationRequest::Create(_) => MutationKind::Create,
            MutationRequest::Update(_) => MutationKind::Update,
            MutationRequest::Delete(_) => MutationKind::Delete,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            MutationRequest::Create(user)
            | MutationRequest::Update(user)
            | MutationRequest::Delete(user) => user,
        }
    }
}

/// Identity of the cache entry a mutation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    /// The optimistic entry of a create.
    Placeholder(PlaceholderId),
    /// A persisted record.
    Id(UserId),
}

/// Lifecycle of a single mutation instance.
///
/// `Idle -> OptimisticApplied -> Reconciled | RolledBack`; both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    OptimisticApplied,
    Reconciled,
    RolledBack,
}

impl MutationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationPhase::Reconciled | MutationPhase::RolledBack)
    }

    /// Returns true if `next` is a legal successor of this phase.
    pub fn can_advance_to(&self, next: MutationPhase) -> bool {
        matches!(
            (self, next),
            (MutationPhase::Idle, MutationPhase::OptimisticApplied)
                | (MutationPhase::OptimisticApplied, MutationPhase::Reconciled)
                | (MutationPhase::OptimisticApplied, MutationPhase::RolledBack)
        )
    }
}

/// A request that passed its preconditions, with the identity it will reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlannedMutation {
    Create { user: User, placeholder: PlaceholderId },
    Update { id: UserId, user: User },
    Delete { id: UserId, user: User },
}

impl PlannedMutation {
    /// Checks the identity rules for `request`.
    pub(crate) fn plan(request: MutationRequest) -> Result<Self, MutationError> {
        let kind = request.kind();
        match request {
            MutationRequest::Create(user) => match user.id {
                Some(id) => Err(MutationError::UnexpectedId { id }),
                None => Ok(PlannedMutation::Create {
                    user,
                    placeholder: PlaceholderId::new(),
                }),
            },
            MutationRequest::Update(user) => {
                let id = user.id.ok_or(MutationError::MissingId { kind })?;
                Ok(PlannedMutation::Update { id, user })
            }
            MutationRequest::Delete(user) => {
                let id = user.id.ok_or(MutationError::MissingId { kind })?;
                Ok(PlannedMutation::Delete { id, user })
            }
        }
    }

    pub(crate) fn kind(&self) -> MutationKind {
        match self {
            PlannedMutation::Create { .. } => MutationKind::Create,
            PlannedMutation::Update { .. } => MutationKind::Update,
            PlannedMutation::Delete { .. } => MutationKind::Delete,
        }
    }

    pub(crate) fn target(&self) -> MutationTarget {
        match self {
            PlannedMutation::Create { placeholder, .. } => MutationTarget::Placeholder(*placeholder),
            PlannedMutation::Update { id, .. } | PlannedMutation::Delete { id, .. } => {
                MutationTarget::Id(*id)
            }
        }
    }

    pub(crate) fn user(&self) -> &User {
        match self {
            PlannedMutation::Create { user, .. }
            | PlannedMutation::Update { user, .. }
            | PlannedMutation::Delete { user, .. } => user,
        }
    }
}

/// Context captured when a mutation begins.
///
/// Holds the snapshot to roll back to and the identity to reconcile. Hand it to
/// [`MutationCoordinator::settle`](super::MutationCoordinator::settle) to issue the
/// remote call.
#[must_use = "a pending mutation keeps its optimistic state in the cache until settled"]
#[derive(Debug)]
pub struct PendingMutation {
    planned: PlannedMutation,
    previous: Snapshot,
    phase: MutationPhase,
}

impl PendingMutation {
    pub(crate) fn new(planned: PlannedMutation, previous: Snapshot) -> Self {
        Self {
            planned,
            previous,
            phase: MutationPhase::Idle,
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.planned.kind()
    }

    pub fn target(&self) -> MutationTarget {
        self.planned.target()
    }

    /// The user record sent to the remote.
    pub fn user(&self) -> &User {
        self.planned.user()
    }

    /// The snapshot this mutation rolls back to.
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn phase(&self) -> MutationPhase {
        self.phase
    }

    pub(crate) fn planned(&self) -> &PlannedMutation {
        &self.planned
    }

    pub(crate) fn advance(&mut self, next: MutationPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal mutation transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

/// Authoritative result of a settled mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "result", rename_all = "lowercase")]
pub enum MutationOutcome {
    Created(User),
    Updated(User),
    Deleted(UserId),
}

impl MutationOutcome {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationOutcome::Created(_) => MutationKind::Create,
            MutationOutcome::Updated(_) => MutationKind::Update,
            MutationOutcome::Deleted(_) => MutationKind::Delete,
        }
    }

    /// The record returned by the remote, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            MutationOutcome::Created(user) | MutationOutcome::Updated(user) => Some(user),
            MutationOutcome::Deleted(_) => None,
        }
    }
}

/// In-flight and error state for one mutation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationStatus {
    /// Number of mutations of this kind waiting on the remote.
    pub in_flight: usize,
    /// Message of the most recent failure, cleared when a new mutation begins.
    pub last_error: Option<String>,
}

impl MutationStatus {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight > 0
    }
}

/// Status of every mutation kind, for disabling controls and showing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationBoard {
    pub create: MutationStatus,
    pub update: MutationStatus,
    pub delete: MutationStatus,
}

impl MutationBoard {
    pub fn get(&self, kind: MutationKind) -> &MutationStatus {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Update => &self.update,
            MutationKind::Delete => &self.delete,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: MutationKind) -> &mut MutationStatus {
        match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Delete => &mut self.delete,
        }
    }

    pub fn any_in_flight(&self) -> bool {
        MutationKind::ALL.iter().any(|kind| self.get(*kind).is_in_flight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        assert!(MutationPhase::Idle.can_advance_to(MutationPhase::OptimisticApplied));
        assert!(MutationPhase::OptimisticApplied.can_advance_to(MutationPhase::Reconciled));
        assert!(MutationPhase::OptimisticApplied.can_advance_to(MutationPhase::RolledBack));

        assert!(!MutationPhase::Idle.can_advance_to(MutationPhase::Reconciled));
        assert!(!MutationPhase::Reconciled.can_advance_to(MutationPhase::RolledBack));
        assert!(!MutationPhase::RolledBack.can_advance_to(MutationPhase::OptimisticApplied));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!MutationPhase::Idle.is_terminal());
        assert!(!MutationPhase::OptimisticApplied.is_terminal());
        assert!(MutationPhase::Reconciled.is_terminal());
        assert!(MutationPhase::RolledBack.is_terminal());
    }

    #[test]
    fn test_request_kind() {
        let user = User::new("A", "a@example.com", "admin");

        assert_eq!(MutationRequest::Create(user.clone()).kind(), MutationKind::Create);
        assert_eq!(MutationRequest::Update(user.clone()).kind(), MutationKind::Update);
        assert_eq!(MutationRequest::Delete(user).kind(), MutationKind::Delete);
    }

    #[test]
    fn test_plan_create_rejects_id() {
        let request = MutationRequest::Create(User::new("A", "a@example.com", "").with_id(3));

        assert_eq!(
            PlannedMutation::plan(request),
            Err(MutationError::UnexpectedId { id: 3 })
        );
    }

    #[test]
    fn test_plan_update_and_delete_require_id() {
        let user = User::new("A", "a@example.com", "");

        assert_eq!(
            PlannedMutation::plan(MutationRequest::Update(user.clone())),
            Err(MutationError::MissingId {
                kind: MutationKind::Update
            })
        );
        assert_eq!(
            PlannedMutation::plan(MutationRequest::Delete(user)),
            Err(MutationError::MissingId {
                kind: MutationKind::Delete
            })
        );
    }

    #[test]
    fn test_plan_targets() {
        let user = User::new("A", "a@example.com", "");

        let create = PlannedMutation::plan(MutationRequest::Create(user.clone())).unwrap();
        assert!(matches!(create.target(), MutationTarget::Placeholder(_)));

        let delete = PlannedMutation::plan(MutationRequest::Delete(user.with_id(4))).unwrap();
        assert_eq!(delete.target(), MutationTarget::Id(4));
        assert_eq!(delete.kind(), MutationKind::Delete);
    }

    #[test]
    fn test_board_tracks_kinds_independently() {
        let mut board = MutationBoard::default();
        board.get_mut(MutationKind::Delete).in_flight = 1;

        assert!(board.any_in_flight());
        assert!(board.get(MutationKind::Delete).is_in_flight());
        assert!(!board.get(MutationKind::Create).is_in_flight());
    }

    #[test]
    fn test_outcome_user() {
        let user = User::new("A", "a@example.com", "admin").with_id(1);

        assert_eq!(MutationOutcome::Created(user.clone()).user(), Some(&user));
        assert_eq!(MutationOutcome::Deleted(1).user(), None);
        assert_eq!(MutationOutcome::Deleted(1).kind(), MutationKind::Delete);
    }

    #[test]
    fn test_outcome_serialization() {
        let created = MutationOutcome::Created(User::new("A", "a@example.com", "admin").with_id(4));

        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            serde_json::json!({
                "action": "created",
                "result": {"id": 4, "name": "A", "email": "a@example.com", "role": "admin"}
            })
        );
        assert_eq!(
            serde_json::to_value(MutationOutcome::Deleted(4)).unwrap(),
            serde_json::json!({"action": "deleted", "result": 4})
        );
    }
}
