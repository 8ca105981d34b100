/*
 * Responsibility
 * - GET /users (any authenticated caller)
 * - GET /users/{user_id} (role gate applied in routes)
 * - only PublicUser leaves this module; hashes never do
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::user_store::PublicUser;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    AuthCtx(claims): AuthCtx,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    tracing::debug!(subject = claims.subject, "listing users");
    let users = state.auth.users().find_all().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .auth
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(user))
}
