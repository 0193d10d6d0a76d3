//! The remote user collection as seen by the core.
//!
//! Transport details stay behind [`UserRemote`]; the core only needs to know that a
//! call resolved with a record (or acknowledgement) or failed.

mod error;
mod inmemory;
mod traits;

pub use error::{RemoteError, Result};
pub use inmemory::{InMemoryRemote, RemoteOperation};
pub use traits::UserRemote;
