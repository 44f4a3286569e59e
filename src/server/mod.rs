//! Server
//!
//! Server configuration, shared application state, and app construction.
//!
//! - **`config`** - environment-backed `ServerConfig`
//! - **`state`** - `AppState` container with `FromRef` extraction
//! - **`init`** - builds the configured router from a `ServerConfig`

pub mod config;
pub mod init;
pub mod state;
