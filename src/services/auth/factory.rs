//! Factory: build `AuthService` from application `Config` and a user store.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::user_store::UserStore;
use crate::services::auth::{AuthService, TokenCodec};

pub fn build_auth_service(config: &Config, users: Arc<dyn UserStore>) -> Arc<AuthService> {
    let tokens = TokenCodec::new(&config.jwt_secret);
    Arc::new(AuthService::new(users, tokens))
}
