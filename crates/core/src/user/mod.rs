mod patch;
mod types;

pub use patch::UserPatch;
pub use types::{User, UserId};
