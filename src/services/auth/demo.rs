//! Demo accounts for development runs on the in-memory store.
//!
//! Written straight to the store (not through `register`) because `bob` holds
//! the reserved `admin` role.
use tokio::task::spawn_blocking;

use crate::repos::user_store::{NewUser, UserStore};
use crate::services::auth::password;
use crate::services::auth::service::RegisterError;

pub const DEMO_PASSWORD: &str = "1234";
pub const DEMO_USERS: &[(&str, &str)] = &[("bob", "admin"), ("sue", "student")];

pub async fn seed_demo_users(store: &dyn UserStore) -> Result<(), RegisterError> {
    for (username, role_name) in DEMO_USERS {
        let password_hash = spawn_blocking(|| password::hash(DEMO_PASSWORD)).await??;
        store
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                role_name: role_name.to_string(),
            })
            .await?;
    }

    tracing::info!(count = DEMO_USERS.len(), store = store.backend_name(), "seeded demo users");
    Ok(())
}
