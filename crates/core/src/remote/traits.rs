use async_trait::async_trait;

use crate::user::{User, UserId};

use super::Result;

/// Operations offered by the remote users collection.
#[async_trait]
pub trait UserRemote: Send + Sync {
    /// Fetches the whole collection.
    async fn fetch_all(&self) -> Result<Vec<User>>;

    /// Persists a new user. The returned record carries the assigned id.
    async fn create(&self, user: &User) -> Result<User>;

    /// Replaces an existing user and returns the stored record.
    async fn update(&self, user: &User) -> Result<User>;

    /// Deletes the user with the given id.
    async fn delete(&self, id: UserId) -> Result<()>;
}
