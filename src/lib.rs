//! Token issuance, verification, and role gating for an HTTP API.
//!
//! - `services::auth`: role normalization, password hashing, token codec, gates,
//!   register/login flows
//! - `repos`: the `UserStore` interface and its Postgres / in-memory backends
//! - `api`, `middleware`: the axum adapter
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;

pub use app::{build_router, build_state};
pub use config::Config;
pub use state::AppState;
