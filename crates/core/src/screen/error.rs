use thiserror::Error;

use crate::mutation::MutationError;
use crate::view::TableError;

/// Errors surfaced to the users screen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Cannot delete a user without an id")]
    MissingId,
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
