//! Integration tests
//!
//! Exercises the HTTP surface end to end over in-memory state, plus the
//! interaction between REST mutations and the room event relay.

pub mod realtime_rooms;
pub mod tasks_api;
