//! In-memory remote for tests and offline demos.
//!
//! Stores users in a `Vec` wrapped in `Arc<RwLock<_>>` and assigns increasing ids on
//! create. Individual operations can be switched to fail to exercise rollback paths.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::user::{User, UserId};

use super::{RemoteError, Result, UserRemote};

/// The remote operations, used to select which ones fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    FetchAll,
    Create,
    Update,
    Delete,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteOperation::FetchAll => "fetch_all",
            RemoteOperation::Create => "create",
            RemoteOperation::Update => "update",
            RemoteOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// In-memory implementation of [`UserRemote`].
#[derive(Debug, Clone)]
pub struct InMemoryRemote {
    users: Arc<RwLock<Vec<User>>>,
    next_id: Arc<AtomicU64>,
    failing: Arc<RwLock<HashSet<RemoteOperation>>>,
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRemote {
    /// Creates an empty remote whose first assigned id is 1.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a remote holding `users`. Records without an id get one assigned.
    pub fn with_users(users: Vec<User>) -> Self {
        let mut next_id = users.iter().filter_map(|u| u.id).max().unwrap_or(0) + 1;
        let users = users
            .into_iter()
            .map(|user| {
                if user.is_persisted() {
                    user
                } else {
                    let id = next_id;
                    next_id += 1;
                    user.with_id(id)
                }
            })
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Makes `operation` fail until [`InMemoryRemote::recover`] is called.
    pub async fn fail(&self, operation: RemoteOperation) {
        self.failing.write().await.insert(operation);
    }

    /// Makes `operation` succeed again.
    pub async fn recover(&self, operation: RemoteOperation) {
        self.failing.write().await.remove(&operation);
    }

    /// Returns a copy of the stored users.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    async fn check(&self, operation: RemoteOperation) -> Result<()> {
        if self.failing.read().await.contains(&operation) {
            return Err(RemoteError::Status {
                status: 503,
                message: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }

    fn not_found(id: UserId) -> RemoteError {
        RemoteError::Status {
            status: 404,
            message: format!("User not found: {id}"),
        }
    }
}

#[async_trait]
impl UserRemote for InMemoryRemote {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        self.check(RemoteOperation::FetchAll).await?;
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, user: &User) -> Result<User> {
        self.check(RemoteOperation::Create).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = User {
            id: Some(id),
            ..user.clone()
        };
        self.users.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User> {
        self.check(RemoteOperation::Update).await?;
        let id = user
            .id
            .ok_or_else(|| RemoteError::InvalidResponse("update without id".to_string()))?;
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.has_id(id))
            .ok_or_else(|| Self::not_found(id))?;
        *stored = user.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.check(RemoteOperation::Delete).await?;
        let mut users = self.users.write().await;
        let position = users
            .iter()
            .position(|u| u.has_id(id))
            .ok_or_else(|| Self::not_found(id))?;
        users.remove(position);
        Ok(())
    }
}
