//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Test application construction
//! - Authentication test helpers


// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
