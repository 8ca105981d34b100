/*
 * Responsibility
 * - users table access through SQLx (PostgreSQL)
 * - unique violations are surfaced as RepoError::DuplicateUsername
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_store::{NewUser, PublicUser, User, UserStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id   BIGSERIAL PRIMARY KEY,
    username  TEXT         NOT NULL UNIQUE,
    password  VARCHAR(256) NOT NULL,
    role_name VARCHAR(32)  NOT NULL
)
"#;

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, role_name
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<PublicUser>> {
        let row = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT user_id, username, role_name
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepoResult<Vec<PublicUser>> {
        let rows = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT user_id, username, role_name
            FROM users
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, role_name)
            VALUES ($1, $2, $3)
            RETURNING user_id, username, password, role_name
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.role_name)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_does_not_cap_username_length() {
        let username = SCHEMA
            .lines()
            .find(|line| line.trim_start().starts_with("username"))
            .unwrap();
        assert!(username.contains("TEXT"), "{username}");
        assert!(!username.contains("VARCHAR"), "{username}");
    }
}
