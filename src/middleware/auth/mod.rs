//! Authentication (`access`) and role gating (`role`) for protected routes.
//!
//! Layer order matters: `access` must wrap `role`, so apply `role` to the inner
//! router first and `access` to the router that contains it.
pub mod access;
pub mod role;
