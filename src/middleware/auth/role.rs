//! Role gate for routes that need one specific role.
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::gate;

/// Only let requests whose token carries exactly `required_role` reach `router`'s routes.
///
/// Expects `access::apply` to run first (it provides the claims).
pub fn apply<S>(router: Router<S>, required_role: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn(
        move |ctx: AuthCtx, req: Request, next: Next| role_middleware(required_role, ctx, req, next),
    ))
}

async fn role_middleware(
    required_role: &'static str,
    AuthCtx(claims): AuthCtx,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(err) = gate::authorize(&claims, required_role) {
        tracing::warn!(
            subject = claims.subject,
            role_name = %claims.role_name,
            required_role,
            "role check failed"
        );
        return Err(err.into());
    }

    Ok(next.run(req).await)
}
