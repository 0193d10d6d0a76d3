//! Users administration screen.
//!
//! [`ScreenState::handle`] turns an [`Intent`] into an [`Effect`] without side effects;
//! [`AdminScreen::dispatch`] performs the effect against the table view and the mutation
//! coordinator.

mod admin;
mod error;
mod state;

pub use admin::AdminScreen;
pub use error::{Result, ScreenError};
pub use state::{Effect, Intent, Modal, ScreenState, TableIntent, UserForm};
