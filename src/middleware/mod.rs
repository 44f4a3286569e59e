//! Request Middleware
//!
//! Bearer-token authentication for the REST surface.

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
