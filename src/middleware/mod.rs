//! Middleware del sistema
//!
//! Sesión (cookie JWT) y CORS.

pub mod auth;
pub mod cors;

pub use auth::{require_session, AuthenticatedUser};
pub use cors::cors_layer;
