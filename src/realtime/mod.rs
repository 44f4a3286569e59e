//! Real-time Collaboration Layer
//!
//! Bidirectional event channel for project rooms. Clients authenticate the
//! WebSocket handshake with a bearer token, subscribe to per-project rooms,
//! and receive task/milestone mutation events broadcast to that room.
//!
//! # Architecture
//!
//! - **`protocol`** - wire types: client commands and room events
//! - **`relay`** - connection table, room membership registry, broadcast fan-out
//! - **`socket`** - axum WebSocket handler: handshake auth and message loop
//!
//! # Delivery semantics
//!
//! Delivery is best-effort and at-most-once per currently-connected member.
//! Events are not persisted or replayed; the stores remain authoritative and
//! clients reconcile with a fresh fetch after a reconnect. Broadcasts to the
//! same room from this process are delivered to each subscriber in issue
//! order; no ordering holds across rooms.

pub mod protocol;
pub mod relay;
pub mod socket;

pub use protocol::{ClientMessage, EventName, RoomEvent};
pub use relay::{ConnectionId, EventRelay};
pub use socket::ws_handler;
