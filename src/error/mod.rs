//! Error Types
//!
//! This module defines the error taxonomy used by the REST handlers and the
//! real-time layer, together with the conversion into HTTP responses.
//!
//! - `Unauthorized` - bad/missing/expired credential; always surfaces the
//!   same generic message so callers cannot distinguish the failure mode
//! - `Validation` - malformed request payload; nothing was mutated
//! - `NotFound` - referenced entity does not exist; nothing was mutated
//! - `Store` - the underlying store operation failed; not retried here
//!
//! Failures are always local to the single requester. Nothing is broadcast
//! on any error path.

pub mod types;

pub use types::ApiError;
