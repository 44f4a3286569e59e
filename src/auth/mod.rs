//! Authentication
//!
//! JWT creation and verification for user sessions. Token issuance endpoints
//! live outside this service; this module only mints tokens for tests and
//! verifies tokens presented to the REST middleware and the socket handshake.

pub mod sessions;

pub use sessions::{create_token, identity_from_token, verify_token, AuthConfig, Claims};
