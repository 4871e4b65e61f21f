use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
}

/// User plus the stored Argon2 hash; only produced for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `None` when the email is already registered.
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
}
