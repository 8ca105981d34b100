/*!
 * Authenticated request context
 *
 * Responsibility:
 * - hand the verified `Claims` to handlers and to the role gate
 * - axum wiring lives in `core`, the type in `types`
 */

mod core;
mod types;

pub use types::AuthCtx;
