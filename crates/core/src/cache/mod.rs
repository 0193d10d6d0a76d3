mod snapshot;
mod store;

pub use snapshot::{CachedUser, PlaceholderId, Snapshot};
pub use store::{CacheStore, RefreshTicket};
