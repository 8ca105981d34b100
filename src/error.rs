/*
 * Responsibility
 * - the AppError every handler/middleware returns
 * - IntoResponse: HTTP status + `{"message": ...}` body
 * - conversion from service errors; internal detail is logged, not returned
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repos::error::RepoError;
use crate::services::auth::gate::{AccessError, AuthError};
use crate::services::auth::role::RoleError;
use crate::services::auth::service::{LoginError, RegisterError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Username taken")]
    Conflict,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Role(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials | AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Access(_) => StatusCode::FORBIDDEN,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::DuplicateUsername => AppError::Conflict,
            RepoError::Db(e) => {
                error!(error = %e, "user store failure");
                AppError::Internal
            }
        }
    }
}

impl From<RegisterError> for AppError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Role(e) => AppError::Role(e),
            RegisterError::DuplicateUsername => AppError::Conflict,
            RegisterError::Store(e) => e.into(),
            RegisterError::Hash(_) | RegisterError::Task(_) => {
                error!(error = %e, "registration failed");
                AppError::Internal
            }
        }
    }
}

impl From<LoginError> for AppError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => AppError::InvalidCredentials,
            LoginError::Store(e) => e.into(),
            LoginError::Signing(_) | LoginError::Task(_) => {
                error!(error = %e, "login failed");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_message_mapping() {
        let cases = [
            (AppError::Role(RoleError::ReservedName), 422, "Role name can not be admin"),
            (AppError::InvalidCredentials, 401, "Invalid credentials"),
            (AppError::Auth(AuthError::TokenMissing), 401, "Token required"),
            (AppError::Auth(AuthError::TokenInvalid), 401, "Token invalid"),
            (AppError::Access(AccessError::Forbidden), 403, "This is not for you"),
            (AppError::Conflict, 409, "Username taken"),
            (AppError::not_found("user"), 404, "user not found"),
            (AppError::Internal, 500, "internal server error"),
        ];

        for (err, status, message) in cases {
            assert_eq!(err.status().as_u16(), status);
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn store_errors_never_become_credential_errors() {
        let err: AppError = LoginError::Store(RepoError::Db(sqlx::Error::PoolTimedOut)).into();
        assert!(matches!(err, AppError::Internal));
    }
}
