//! usersync_core - functional core for the users administration screen.
//!
//! The crate keeps a local snapshot of a remote user collection consistent with an
//! unreliable remote store while mutations are applied optimistically, and derives the
//! paged, sorted table rows the interface renders from that snapshot.

pub mod cache;
pub mod mock_data;
pub mod mutation;
pub mod remote;
pub mod screen;
pub mod serde;
pub mod user;
pub mod view;
