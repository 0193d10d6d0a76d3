//! Optimistic mutations over the users cache.
//!
//! A mutation is applied to the cache before its remote call is issued, then either
//! reconciled with the authoritative result or rolled back to the snapshot captured
//! when it began.

mod apply;
mod coordinator;
mod error;
mod types;

pub use apply::{append_placeholder, reconcile_created, reconcile_updated, remove_by_id, replace_by_id};
pub use coordinator::{MutationCoordinator, RefreshOutcome};
pub use error::{MutationError, Result};
pub use types::{
    MutationBoard, MutationKind, MutationOutcome, MutationPhase, MutationRequest, MutationStatus,
    MutationTarget, PendingMutation,
};
