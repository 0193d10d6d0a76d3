//! User API operations.

use super::UsersyncClient;
use crate::error::{ClientError, Result};
use usersync_core::user::{User, UserId};

impl UsersyncClient {
    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        tracing::debug!(base_url = %self.base_url, "GET /users");
        let response = self.client.get(self.url("/users")).send().await?;
        self.handle_response(response, "Users").await
    }

    /// Create a user. The server assigns the id.
    pub async fn create_user(&self, user: &User) -> Result<User> {
        tracing::debug!(name = %user.name, "POST /users");
        let response = self
            .client
            .post(self.url("/users"))
            .json(user)
            .send()
            .await?;
        self.handle_response(response, "Users").await
    }

    /// Replace the user with `user.id`.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let id = user
            .id
            .ok_or_else(|| ClientError::InvalidInput("cannot update a user without an id".to_string()))?;
        tracing::debug!(id, "PUT /users/{id}");
        let response = self
            .client
            .put(self.url(&format!("/users/{}", id)))
            .json(user)
            .send()
            .await?;
        self.handle_response(response, &format!("User {}", id)).await
    }

    /// Delete user by ID.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        tracing::debug!(id, "DELETE /users/{id}");
        let response = self
            .client
            .delete(self.url(&format!("/users/{}", id)))
            .send()
            .await?;
        self.handle_delete_response(response, &format!("User {}", id))
            .await
    }
}
