//! Request-time gates.
//!
//! - `authenticate`: optional presented token -> verified `Claims`
//! - `authorize`: verified `Claims` + required role -> allow / forbid
//!
//! Callers only ever see `AuthError` / `AccessError`. Which `TokenError` caused a
//! rejection is logged, not returned.
use thiserror::Error;
use tracing::debug;

use crate::services::auth::jwt::{Claims, TokenCodec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token required")]
    TokenMissing,

    #[error("Token invalid")]
    TokenInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("This is not for you")]
    Forbidden,
}

pub fn authenticate(token: Option<&str>, codec: &TokenCodec) -> Result<Claims, AuthError> {
    let token = match token.map(str::trim) {
        None | Some("") => return Err(AuthError::TokenMissing),
        Some(t) => t,
    };

    codec.verify(token).map_err(|reason| {
        debug!(%reason, "token rejected");
        AuthError::TokenInvalid
    })
}

/// Exact, case-sensitive role match. No hierarchy.
pub fn authorize(claims: &Claims, required_role: &str) -> Result<(), AccessError> {
    if claims.role_name == required_role {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}
