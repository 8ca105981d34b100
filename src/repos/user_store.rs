//! User store interface consumed by the auth services.
use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;

use crate::repos::error::RepoResult;

/// Full user record, including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub role_name: String,
}

/// What callers are allowed to see of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
    pub role_name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            role_name: u.role_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role_name: String,
}

/// Implementations assign `user_id` and enforce unique usernames
/// (`RepoError::DuplicateUsername`).
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Returns the store backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<PublicUser>>;

    async fn find_all(&self) -> RepoResult<Vec<PublicUser>>;

    async fn create(&self, new_user: NewUser) -> RepoResult<User>;
}
