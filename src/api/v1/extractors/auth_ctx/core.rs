use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{Claims, gate::AuthError};

use super::AuthCtx;

// Missing claims means the access middleware did not run on this route:
// answer like a request without a token.
impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthCtx)
            .ok_or(AppError::Auth(AuthError::TokenMissing))
    }
}
