pub mod auth;

pub use auth::{admin_middleware, jwt_auth_middleware, AuthUser};
