use std::sync::Arc;

use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};
use tracing::{error, info, warn};

use crate::repos::error::RepoError;
use crate::repos::user_store::{NewUser, PublicUser, UserStore};
use crate::services::auth::jwt::TokenCodec;
use crate::services::auth::password::{self, PasswordError};
use crate::services::auth::role::{self, RoleError};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Role(#[from] RoleError),

    #[error("username already exists")]
    DuplicateUsername,

    #[error(transparent)]
    Hash(#[from] PasswordError),

    #[error("user store error: {0}")]
    Store(#[source] RepoError),

    #[error("blocking task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<RepoError> for RegisterError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::DuplicateUsername => RegisterError::DuplicateUsername,
            other => RegisterError::Store(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Same value for "no such user" and "wrong password".
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("user store error: {0}")]
    Store(#[from] RepoError),

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] JoinError),
}

/// Service-level return type of a successful login; handlers map it to the DTO.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub message: String,
    pub token: String,
}

/// Registration and login flows on top of a [`UserStore`] and a [`TokenCodec`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenCodec,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("users", &self.users.backend_name())
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenCodec) -> Self {
        Self { users, tokens }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// Normalize the role, hash the password, persist, and return the public projection.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        raw_role_name: Option<&str>,
    ) -> Result<PublicUser, RegisterError> {
        let role_name = role::normalize(raw_role_name)?;

        let plaintext = password.to_string();
        let password_hash = spawn_blocking(move || password::hash(&plaintext)).await??;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                role_name: role_name.into_inner(),
            })
            .await
            .map_err(|e| {
                if !matches!(e, RepoError::DuplicateUsername) {
                    error!(username, error = %e, "failed to create user");
                }
                RegisterError::from(e)
            })?;

        info!(
            user_id = user.user_id,
            username = %user.username,
            role_name = %user.role_name,
            "user registered"
        );

        Ok(user.into())
    }

    /// Check credentials and issue a one-day token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, LoginError> {
        let user = self.users.find_by_username(username).await.map_err(|e| {
            error!(username, error = %e, "failed to look up user");
            LoginError::Store(e)
        })?;

        let plaintext = password.to_string();
        let Some(user) = user else {
            spawn_blocking(move || password::verify_decoy(&plaintext)).await?;
            warn!(username, "login rejected");
            return Err(LoginError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let matches = spawn_blocking(move || password::verify(&plaintext, &stored_hash)).await?;
        if !matches {
            warn!(username, "login rejected");
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.user_id, &user.username, &user.role_name)?;

        info!(user_id = user.user_id, username, "user logged in");

        Ok(LoginOutcome {
            message: format!("{username} is back!"),
            token,
        })
    }
}
