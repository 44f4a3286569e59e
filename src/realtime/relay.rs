/**
 * Event Relay and Room Membership Registry
 *
 * The relay owns the table of authenticated connections and the mapping
 * from project id to the set of connections subscribed to that project's
 * room. It is an explicit instance constructed once at startup and handed
 * to every coordinator through `AppState`; there is no global singleton.
 *
 * Rooms are created implicitly on first join and dropped when their last
 * member leaves or disconnects. Each connection owns an unbounded mpsc
 * queue; a broadcast iterates the room's member set and pushes a clone of
 * the event into each queue. Sends into a queue whose receiver is gone are
 * skipped silently - best-effort delivery is the contract, not an error.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::realtime::protocol::RoomEvent;

/// Identifier of one live socket connection
pub type ConnectionId = Uuid;

/// Context attached to a connection at handshake time
///
/// Identity fields are populated once at registration and never change;
/// only the room membership set mutates afterwards.
#[derive(Debug)]
struct ConnectionEntry {
    user_id: Uuid,
    email: String,
    sender: mpsc::UnboundedSender<RoomEvent>,
    rooms: HashSet<Uuid>,
}

#[derive(Debug, Default)]
struct RelayInner {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<Uuid, HashSet<ConnectionId>>,
}

impl RelayInner {
    /// Push an event to every member of a room, optionally skipping one
    /// connection. Returns the number of successful deliveries.
    fn send_to_room(&self, project: Uuid, event: &RoomEvent, skip: Option<ConnectionId>) -> usize {
        let Some(members) = self.rooms.get(&project) else {
            return 0;
        };
        let mut delivered = 0;
        for conn_id in members {
            if Some(*conn_id) == skip {
                continue;
            }
            if let Some(entry) = self.connections.get(conn_id) {
                if entry.sender.send(event.clone()).is_ok() {
                    delivered += 1;
                } else {
                    // Receiver already dropped; the disconnect path will
                    // clean the table up.
                    tracing::debug!("[Relay] Skipping closed connection {}", conn_id);
                }
            }
        }
        delivered
    }
}

/// Room-scoped event relay
///
/// Cheap to clone; all clones share the same connection table.
#[derive(Debug, Clone, Default)]
pub struct EventRelay {
    inner: Arc<RwLock<RelayInner>>,
}

impl EventRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an authenticated connection
    ///
    /// Returns the connection id and the receiving end of the connection's
    /// event queue. The caller (the socket task) drains the receiver and
    /// writes each event to the wire.
    pub async fn register(
        &self,
        user_id: Uuid,
        email: String,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<RoomEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let conn_id = Uuid::new_v4();
        let mut inner = self.inner.write().await;
        inner.connections.insert(
            conn_id,
            ConnectionEntry {
                user_id,
                email,
                sender,
                rooms: HashSet::new(),
            },
        );
        (conn_id, receiver)
    }

    /// Drop a connection and its membership in every room
    ///
    /// Called on disconnect, graceful or abrupt. No `user:left` events are
    /// emitted on this path.
    pub async fn unregister(&self, conn_id: ConnectionId) {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.connections.remove(&conn_id) else {
            return;
        };
        for project in entry.rooms {
            if let Some(members) = inner.rooms.get_mut(&project) {
                members.remove(&conn_id);
                if members.is_empty() {
                    inner.rooms.remove(&project);
                }
            }
        }
    }

    /// Subscribe a connection to a project room
    ///
    /// Notifies the *other* members of the room with `user:joined`; the
    /// joiner receives nothing. Returns false if the connection is unknown.
    pub async fn join(&self, conn_id: ConnectionId, project: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.connections.get_mut(&conn_id) else {
            return false;
        };
        entry.rooms.insert(project);
        let event = RoomEvent::user_joined(entry.user_id, &entry.email);
        let user_id = entry.user_id;
        inner.rooms.entry(project).or_default().insert(conn_id);
        inner.send_to_room(project, &event, Some(conn_id));
        tracing::info!("[Relay] User {} joined project {}", user_id, project);
        true
    }

    /// Unsubscribe a connection from a project room
    ///
    /// Notifies the remaining members with `user:left`. Membership in other
    /// rooms is unaffected. Returns false if the connection was not a member.
    pub async fn leave(&self, conn_id: ConnectionId, project: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.connections.get_mut(&conn_id) else {
            return false;
        };
        if !entry.rooms.remove(&project) {
            return false;
        }
        let event = RoomEvent::user_left(entry.user_id, &entry.email);
        let user_id = entry.user_id;
        if let Some(members) = inner.rooms.get_mut(&project) {
            members.remove(&conn_id);
            if members.is_empty() {
                inner.rooms.remove(&project);
            }
        }
        inner.send_to_room(project, &event, None);
        tracing::info!("[Relay] User {} left project {}", user_id, project);
        true
    }

    /// Broadcast an event to every current member of a project room
    ///
    /// Used by REST-triggered mutations: the actor's own socket, being a
    /// separate channel from the REST request, receives the event too.
    /// Returns the number of deliveries.
    pub async fn broadcast(&self, project: Uuid, event: RoomEvent) -> usize {
        let inner = self.inner.read().await;
        let delivered = inner.send_to_room(project, &event, None);
        tracing::debug!(
            "[Relay] Broadcast {:?} to project {} ({} deliveries)",
            event.name,
            project,
            delivered
        );
        delivered
    }

    /// Broadcast an event to a room, excluding the originating connection
    ///
    /// Used for peer-originated passthrough messages so the sender never
    /// receives its own echo.
    pub async fn broadcast_except(
        &self,
        project: Uuid,
        event: RoomEvent,
        sender: ConnectionId,
    ) -> usize {
        let inner = self.inner.read().await;
        inner.send_to_room(project, &event, Some(sender))
    }

    /// Number of connections currently subscribed to a room
    pub async fn room_size(&self, project: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.rooms.get(&project).map_or(0, HashSet::len)
    }

    /// Total number of live connections
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }
}
