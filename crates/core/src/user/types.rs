use serde::{Deserialize, Serialize};

use crate::serde::deserialize_nullable_string;

/// Identifier assigned by the remote store when a user is created.
pub type UserId = u64;

/// A user record as held by the remote collection.
///
/// `id` is absent until the remote store has persisted the record. Once assigned it
/// never changes and is the record's identity for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub role: String,
}

impl User {
    /// Creates a new, not yet persisted user.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Sets the identifier (useful for testing and for records coming back from the remote).
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true once the remote store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns true if this record has the given identity.
    pub fn has_id(&self, id: UserId) -> bool {
        self.id == Some(id)
    }
}
