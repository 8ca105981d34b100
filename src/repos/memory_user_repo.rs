//! In-process user store for development runs and tests.
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_store::{NewUser, PublicUser, User, UserStore};

/// Ids are assigned sequentially starting at 1, like a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<PublicUser>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .map(PublicUser::from))
    }

    async fn find_all(&self) -> RepoResult<Vec<PublicUser>> {
        let users = self.users.read().await;
        Ok(users.iter().cloned().map(PublicUser::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(RepoError::DuplicateUsername);
        }

        let next_id = users.iter().map(|u| u.user_id).max().unwrap_or(0) + 1;
        let user = User {
            user_id: next_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role_name: new_user.role_name,
        };
        users.push(user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            role_name: "student".into(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let repo = MemoryUserRepo::new();
        assert_eq!(repo.create(new_user("bob")).await.unwrap().user_id, 1);
        assert_eq!(repo.create(new_user("sue")).await.unwrap().user_id, 2);

        let all = repo.find_all().await.unwrap();
        assert_eq!(
            all.iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
            ["bob", "sue"]
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_usernames() {
        let repo = MemoryUserRepo::new();
        repo.create(new_user("bob")).await.unwrap();

        let err = repo.create(new_user("bob")).await.unwrap_err();
        assert!(matches!(err, RepoError::DuplicateUsername));
    }

    #[tokio::test]
    async fn lookups() {
        let repo = MemoryUserRepo::new();
        repo.create(new_user("bob")).await.unwrap();

        assert_eq!(
            repo.find_by_username("bob").await.unwrap().unwrap().password_hash,
            "hash"
        );
        assert!(repo.find_by_username("Bob").await.unwrap().is_none());
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().username, "bob");
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }
}
