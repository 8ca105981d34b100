/*
 * Responsibility
 * - v1 URL layout
 * - which routes need a token (access) and which need a role (role)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    auth::{login, register},
    users::{get_user, list_users},
};
use crate::middleware::auth::{access, role};
use crate::state::AppState;

pub const ADMIN_ROLE: &str = "admin";

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let admin_only = role::apply(
        Router::new().route("/users/{user_id}", get(get_user)),
        ADMIN_ROLE,
    );

    let protected = access::apply(
        Router::new().route("/users", get(list_users)).merge(admin_only),
        state,
    );

    public.merge(protected)
}
