/*
 * Responsibility
 * - POST /auth/register, POST /auth/login
 * - body -> DTO validation -> AuthService -> JSON response
 * - login has no shape check; every credential failure is the same 401
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::v1::dto::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::AppError;
use crate::repos::user_store::PublicUser;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let Json(req) = payload.map_err(reject_body)?;
    req.validate().map_err(AppError::BadRequest)?;

    let user = state
        .auth
        .register(&req.username, &req.password, req.role_name.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;

    let out = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        message: out.message,
        token: out.token,
    }))
}

fn reject_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "rejected request body");
    AppError::BadRequest("invalid JSON body")
}
