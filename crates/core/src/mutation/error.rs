use thiserror::Error;

use crate::remote::RemoteError;
use crate::user::UserId;

use super::MutationKind;

/// Errors surfaced by the mutation coordinator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Update or delete requested for a record without identity.
    #[error("{kind} requires a user id")]
    MissingId { kind: MutationKind },
    /// Create requested for a record that already has an id.
    #[error("create must not carry an id, got {id}")]
    UnexpectedId { id: UserId },
    /// The remote call failed; the cache was rolled back.
    #[error("{kind} failed and was rolled back: {source}")]
    Transport {
        kind: MutationKind,
        #[source]
        source: RemoteError,
    },
}

impl MutationError {
    /// Returns true for errors raised before anything was applied.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            MutationError::MissingId { .. } | MutationError::UnexpectedId { .. }
        )
    }

    /// Returns true when the remote call failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, MutationError::Transport { .. })
    }
}

/// Result type for mutation operations.
pub type Result<T> = std::result::Result<T, MutationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_display() {
        let error = MutationError::MissingId {
            kind: MutationKind::Delete,
        };
        assert_eq!(error.to_string(), "delete requires a user id");
        assert!(error.is_precondition());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_unexpected_id_display() {
        let error = MutationError::UnexpectedId { id: 3 };
        assert_eq!(error.to_string(), "create must not carry an id, got 3");
        assert!(error.is_precondition());
    }

    #[test]
    fn test_transport_display() {
        let error = MutationError::Transport {
            kind: MutationKind::Update,
            source: RemoteError::Request("timed out".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "update failed and was rolled back: Request failed: timed out"
        );
        assert!(error.is_transport());
        assert!(!error.is_precondition());
    }
}
