use async_trait::async_trait;
use usersync_core::remote::{self, UserRemote};
use usersync_core::user::{User, UserId};

use super::UsersyncClient;

#[async_trait]
impl UserRemote for UsersyncClient {
    async fn fetch_all(&self) -> remote::Result<Vec<User>> {
        Ok(self.list_users().await?)
    }

    async fn create(&self, user: &User) -> remote::Result<User> {
        Ok(self.create_user(user).await?)
    }

    async fn update(&self, user: &User) -> remote::Result<User> {
        Ok(self.update_user(user).await?)
    }

    async fn delete(&self, id: UserId) -> remote::Result<()> {
        Ok(self.delete_user(id).await?)
    }
}
