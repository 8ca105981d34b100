pub mod demo;
pub mod factory;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod role;
pub mod service;

pub use factory::build_auth_service;
pub use jwt::{Claims, TokenCodec};
pub use service::AuthService;
