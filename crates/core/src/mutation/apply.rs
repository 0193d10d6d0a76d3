//! Snapshot transforms used by the coordinator.
//!
//! This is part of the functional core: every function is pure and returns a new
//! snapshot. When a transform has nothing to change it returns a clone of its input,
//! which shares storage with it.

use crate::cache::{CachedUser, PlaceholderId, Snapshot};
use crate::user::{User, UserId};

use super::types::PlannedMutation;
use super::MutationOutcome;

/// The change a mutation shows before its remote call is issued.
pub(crate) fn apply_optimistic(snapshot: &Snapshot, planned: &PlannedMutation) -> Snapshot {
    match planned {
        PlannedMutation::Create { user, placeholder } => append_placeholder(snapshot, user, *placeholder),
        PlannedMutation::Update { user, .. } => replace_by_id(snapshot, user),
        PlannedMutation::Delete { id, .. } => remove_by_id(snapshot, *id),
    }
}

/// The change a mutation makes once the remote confirmed it.
pub(crate) fn apply_confirmed(
    snapshot: &Snapshot,
    planned: &PlannedMutation,
    outcome: &MutationOutcome,
) -> Snapshot {
    match (planned, outcome) {
        (PlannedMutation::Create { placeholder, .. }, MutationOutcome::Created(created)) => {
            reconcile_created(snapshot, *placeholder, created)
        }
        (PlannedMutation::Update { id, .. }, MutationOutcome::Updated(updated)) => {
            reconcile_updated(snapshot, *id, updated)
        }
        (_, MutationOutcome::Deleted(id)) => remove_by_id(snapshot, *id),
        _ => snapshot.clone(),
    }
}

/// Appends the optimistic entry of a create, tagged with `placeholder`.
pub fn append_placeholder(snapshot: &Snapshot, user: &User, placeholder: PlaceholderId) -> Snapshot {
    let mut entries = snapshot.entries().to_vec();
    entries.push(CachedUser::pending(user.clone(), placeholder));
    Snapshot::from_entries(entries)
}

/// Replaces the record with the same id as `user`.
pub fn replace_by_id(snapshot: &Snapshot, user: &User) -> Snapshot {
    let Some(position) = user.id.and_then(|id| snapshot.position_of(id)) else {
        return snapshot.clone();
    };

    let mut entries = snapshot.entries().to_vec();
    entries[position] = CachedUser::confirmed(user.clone());
    Snapshot::from_entries(entries)
}

/// Removes the record with the given id.
pub fn remove_by_id(snapshot: &Snapshot, id: UserId) -> Snapshot {
    if snapshot.position_of(id).is_none() {
        return snapshot.clone();
    }

    let entries = snapshot
        .entries()
        .iter()
        .filter(|entry| !entry.user.has_id(id))
        .cloned()
        .collect();
    Snapshot::from_entries(entries)
}

/// Swaps the optimistic entry tagged with `placeholder` for the created record.
///
/// If the placeholder is gone (a rollback or refresh removed it), the record takes
/// the slot of an entry with the same id, or is appended. Any other entry with the
/// created id is dropped so the snapshot keeps one entry per id.
pub fn reconcile_created(snapshot: &Snapshot, placeholder: PlaceholderId, created: &User) -> Snapshot {
    let mut entries = snapshot.entries().to_vec();
    let slot = snapshot
        .position_of_placeholder(placeholder)
        .or_else(|| created.id.and_then(|id| snapshot.position_of(id)));

    let keep = match slot {
        Some(position) => {
            entries[position] = CachedUser::confirmed(created.clone());
            position
        }
        None => {
            entries.push(CachedUser::confirmed(created.clone()));
            entries.len() - 1
        }
    };

    if let Some(id) = created.id {
        entries = entries
            .into_iter()
            .enumerate()
            .filter(|(position, entry)| *position == keep || !entry.user.has_id(id))
            .map(|(_, entry)| entry)
            .collect();
    }

    Snapshot::from_entries(entries)
}

/// Adopts the record returned by an update at the entry with `id`.
///
/// A returned record without an id is given `id`. Nothing is re-inserted when the
/// entry is no longer in the snapshot.
pub fn reconcile_updated(snapshot: &Snapshot, id: UserId, updated: &User) -> Snapshot {
    let Some(position) = snapshot.position_of(id) else {
        return snapshot.clone();
    };

    let mut adopted = updated.clone();
    adopted.id.get_or_insert(id);

    let mut entries = snapshot.entries().to_vec();
    entries[position] = CachedUser::confirmed(adopted);
    Snapshot::from_entries(entries)
}
