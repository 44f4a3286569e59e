/**
 * Real-time Wire Protocol
 *
 * Messages are JSON text frames in both directions.
 *
 * Client -> server commands are tagged by `type` with the payload in `data`:
 *
 * ```json
 * {"type": "join:project", "data": "<project uuid>"}
 * {"type": "task:move",    "data": {"projectId": "...", ...}}
 * ```
 *
 * Server -> client room events carry the event name and a full-entity
 * snapshot (or `{"id": ...}` for deletions):
 *
 * ```json
 * {"event": "task:moved", "data": { ...task... }}
 * ```
 *
 * Clients treat every event payload as a fresh snapshot of the entity, not
 * a delta, so re-applying a duplicate event is safe.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Commands a client may send over the socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// Subscribe to a project room.
    #[serde(rename = "join:project")]
    JoinProject(Uuid),
    /// Unsubscribe from a project room.
    #[serde(rename = "leave:project")]
    LeaveProject(Uuid),
    /// Relay a task snapshot to the other members of `data.projectId`.
    #[serde(rename = "task:update")]
    TaskUpdate(Value),
    /// Relay a task move to the other members of `data.projectId`.
    #[serde(rename = "task:move")]
    TaskMove(Value),
    /// Relay a milestone snapshot to the other members of `data.projectId`.
    #[serde(rename = "milestone:update")]
    MilestoneUpdate(Value),
}

/// Names of events delivered to room members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "user:joined")]
    UserJoined,
    #[serde(rename = "user:left")]
    UserLeft,
    #[serde(rename = "task:created")]
    TaskCreated,
    #[serde(rename = "task:updated")]
    TaskUpdated,
    #[serde(rename = "task:moved")]
    TaskMoved,
    #[serde(rename = "task:deleted")]
    TaskDeleted,
    #[serde(rename = "milestone:created")]
    MilestoneCreated,
    #[serde(rename = "milestone:updated")]
    MilestoneUpdated,
    #[serde(rename = "milestone:deleted")]
    MilestoneDeleted,
}

/// An event fanned out to the members of one project room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEvent {
    #[serde(rename = "event")]
    pub name: EventName,
    pub data: Value,
}

impl RoomEvent {
    pub fn new(name: EventName, data: Value) -> Self {
        Self { name, data }
    }

    /// Event carrying a full entity snapshot
    pub fn entity<T: Serialize>(name: EventName, entity: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(name, serde_json::to_value(entity)?))
    }

    /// Deletion event carrying only the entity id
    pub fn deleted(name: EventName, id: Uuid) -> Self {
        Self::new(name, serde_json::json!({ "id": id }))
    }

    /// Presence notification for a member joining a room
    pub fn user_joined(user_id: Uuid, email: &str) -> Self {
        Self::new(
            EventName::UserJoined,
            serde_json::json!({ "userId": user_id, "email": email }),
        )
    }

    /// Presence notification for a member leaving a room
    pub fn user_left(user_id: Uuid, email: &str) -> Self {
        Self::new(
            EventName::UserLeft,
            serde_json::json!({ "userId": user_id, "email": email }),
        )
    }
}

/// Extract the target project from a passthrough payload
///
/// Peer-relayed payloads name their room via a `projectId` field. Returns
/// `None` when the field is missing or not a UUID; such messages are dropped.
pub fn project_id_of(data: &Value) -> Option<Uuid> {
    data.get("projectId")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}
