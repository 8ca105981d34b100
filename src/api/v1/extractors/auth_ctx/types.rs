use crate::services::auth::Claims;

/// Verified claims of the caller, valid for the current request only.
///
/// Put into the request extensions by `middleware::auth::access`; handlers and
/// `middleware::auth::role` take it as an extractor.
#[derive(Debug, Clone)]
pub struct AuthCtx(pub Claims);
