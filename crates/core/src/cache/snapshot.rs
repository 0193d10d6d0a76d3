use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::user::{User, UserId};

/// Correlation token for the optimistic entry of an outstanding create.
///
/// The entry has no `id` until the remote call resolves, so reconciliation finds it
/// by this token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderId(Uuid);

impl PlaceholderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaceholderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user held in the cache, tagged when it is still an unconfirmed create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUser {
    pub user: User,
    pub placeholder: Option<PlaceholderId>,
}

impl CachedUser {
    /// A record confirmed by the remote store.
    pub fn confirmed(user: User) -> Self {
        Self {
            user,
            placeholder: None,
        }
    }

    /// The optimistic entry of a create that has not resolved yet.
    pub fn pending(user: User, placeholder: PlaceholderId) -> Self {
        Self {
            user,
            placeholder: Some(placeholder),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// An immutable, ordered view of the user collection.
///
/// Insertion order is display order before sorting. Clones share the same storage,
/// so capturing a snapshot for rollback is cheap. Equality compares content; use
/// [`Snapshot::ptr_eq`] to check identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Arc<Vec<CachedUser>>,
}

impl Snapshot {
    /// Builds a snapshot from confirmed records, keeping the first entry per id.
    pub fn new(users: Vec<User>) -> Self {
        let mut seen: HashSet<UserId> = HashSet::with_capacity(users.len());
        let entries = users
            .into_iter()
            .filter(|user| match user.id {
                Some(id) => seen.insert(id),
                None => true,
            })
            .map(CachedUser::confirmed)
            .collect();

        Self::from_entries(entries)
    }

    /// Builds a snapshot from already tagged entries.
    pub fn from_entries(entries: Vec<CachedUser>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn entries(&self) -> &[CachedUser] {
        &self.entries
    }

    /// Iterates over the user records in display order.
    pub fn users(&self) -> impl ExactSizeIterator<Item = &User> + '_ {
        self.entries.iter().map(|entry| &entry.user)
    }

    /// Copies the user records out of the snapshot.
    pub fn to_users(&self) -> Vec<User> {
        self.users().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the record with the given id.
    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users().find(|user| user.has_id(id))
    }

    /// Position of the record with the given id.
    pub fn position_of(&self, id: UserId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.user.has_id(id))
    }

    /// Position of the optimistic entry tagged with `placeholder`.
    pub fn position_of_placeholder(&self, placeholder: PlaceholderId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.placeholder == Some(placeholder))
    }

    /// Number of unconfirmed creates in the snapshot.
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_pending()).count()
    }

    /// Returns true if both snapshots share the same storage.
    pub fn ptr_eq(a: &Snapshot, b: &Snapshot) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }
}

impl From<Vec<User>> for Snapshot {
    fn from(users: Vec<User>) -> Self {
        Self::new(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, name: &str) -> User {
        User::new(name, format!("{}@example.com", name.to_lowercase()), "member").with_id(id)
    }

    #[test]
    fn test_new_keeps_order() {
        let snapshot = Snapshot::new(vec![user(2, "B"), user(1, "A")]);

        let names: Vec<&str> = snapshot.users().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_new_drops_duplicate_ids() {
        let snapshot = Snapshot::new(vec![user(1, "A"), user(2, "B"), user(1, "A2")]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.find(1).unwrap().name, "A");
    }

    #[test]
    fn test_new_keeps_every_id_less_record() {
        let snapshot = Snapshot::new(vec![
            User::new("X", "x@example.com", ""),
            User::new("Y", "y@example.com", ""),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.pending_count(), 0);
    }

    #[test]
    fn test_position_lookups() {
        let placeholder = PlaceholderId::new();
        let snapshot = Snapshot::from_entries(vec![
            CachedUser::confirmed(user(1, "A")),
            CachedUser::pending(User::new("New", "new@example.com", ""), placeholder),
        ]);

        assert_eq!(snapshot.position_of(1), Some(0));
        assert_eq!(snapshot.position_of(9), None);
        assert_eq!(snapshot.position_of_placeholder(placeholder), Some(1));
        assert_eq!(snapshot.position_of_placeholder(PlaceholderId::new()), None);
        assert_eq!(snapshot.pending_count(), 1);
    }

    #[test]
    fn test_clone_shares_storage() {
        let snapshot = Snapshot::new(vec![user(1, "A")]);
        let cloned = snapshot.clone();
        let rebuilt = Snapshot::new(vec![user(1, "A")]);

        assert!(Snapshot::ptr_eq(&snapshot, &cloned));
        assert!(!Snapshot::ptr_eq(&snapshot, &rebuilt));
        assert_eq!(snapshot, rebuilt);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::default();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_users(), Vec::<User>::new());
    }
}
