//! Token check for protected routes.
//!
//! - reads the token from `Authorization` (`Bearer <jwt>` or the bare token)
//! - verifies it through the authentication gate
//! - stores the resulting `Claims` in the request extensions for `AuthCtx`
use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::gate::{self, AuthError};
use crate::state::AppState;

/// Require a valid token on every route currently in `router`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = presented_token(req.headers())?;

    let claims = match gate::authenticate(presented, state.auth.tokens()) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token rejected");
            return Err(err.into());
        }
    };

    tracing::debug!(
        subject = claims.subject,
        role_name = %claims.role_name,
        expires_at = ?claims.expires_at_utc(),
        "access token accepted"
    );

    // middleware -> extractor hand-off
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// `None` when no Authorization header was sent.
pub(crate) fn presented_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::TokenInvalid)?.trim();

    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static [u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(value).unwrap(),
        );
        headers
    }

    #[test]
    fn no_header_means_no_token() {
        assert_eq!(presented_token(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn bare_and_bearer_tokens_are_accepted() {
        assert_eq!(presented_token(&headers_with(b"abc.def.ghi")), Ok(Some("abc.def.ghi")));
        assert_eq!(presented_token(&headers_with(b"Bearer abc.def.ghi")), Ok(Some("abc.def.ghi")));
        assert_eq!(presented_token(&headers_with(b"bearer  abc.def.ghi ")), Ok(Some("abc.def.ghi")));
    }

    #[test]
    fn empty_bearer_is_an_empty_token() {
        assert_eq!(presented_token(&headers_with(b"Bearer ")), Ok(Some("")));
        assert_eq!(presented_token(&headers_with(b"")), Ok(Some("")));
    }

    #[test]
    fn non_ascii_header_is_invalid() {
        assert_eq!(
            presented_token(&headers_with(b"Bearer \xff\xfe")),
            Err(AuthError::TokenInvalid)
        );
    }
}
