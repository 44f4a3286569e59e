/**
 * Task Move Coordinator
 *
 * Orchestrates one client-initiated move through the pipeline
 * Received -> Validated -> Persisted -> Relayed -> Complete.
 *
 * Validation failures and missing tasks abort before any store mutation or
 * broadcast and surface only to the requester. The `task:moved` broadcast
 * is issued only after the store confirms the write, and once issued it is
 * not retractable - a wrong move is corrected by a new move, never by an
 * undo event.
 */

use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Task, TaskStatus};
use crate::realtime::{EventName, EventRelay, RoomEvent};
use crate::tasks::store::TaskStore;

/// Body of `PATCH /api/tasks/{id}/move`
///
/// `status` and `position` are validated here rather than at extraction so
/// the rejection carries the field-level validation message.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTaskRequest {
    pub status: String,
    pub position: i64,
}

/// Validated move target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    pub status: TaskStatus,
    pub position: u32,
}

impl MoveTaskRequest {
    /// Received -> Validated
    ///
    /// The status must be one of the fixed enum and the position a
    /// non-negative integer; anything else is a validation failure with no
    /// state change.
    pub fn validate(&self) -> Result<MoveTarget, ApiError> {
        let status = TaskStatus::parse(&self.status)
            .ok_or_else(|| ApiError::validation("status", "Invalid status"))?;
        let position = u32::try_from(self.position)
            .map_err(|_| {
                ApiError::validation("position", "Position must be a non-negative integer")
            })?;
        Ok(MoveTarget { status, position })
    }
}

/// Execute a move request end to end
///
/// On success the fresh task snapshot has been broadcast to the project
/// room as `task:moved` and is returned to the requester.
pub async fn move_task(
    tasks: &TaskStore,
    relay: &EventRelay,
    task_id: Uuid,
    request: MoveTaskRequest,
) -> Result<Task, ApiError> {
    let target = request.validate()?;

    // Validated -> Persisted
    let task = tasks
        .move_task(task_id, target.status, target.position)
        .await
        .ok_or_else(|| ApiError::not_found("Task"))?;

    // Persisted -> Relayed
    relay
        .broadcast(task.project, RoomEvent::entity(EventName::TaskMoved, &task)?)
        .await;
    tracing::info!(
        "[Tasks] Task moved: {} -> {} @ {}",
        task.id,
        target.status,
        target.position
    );

    // Relayed -> Complete
    Ok(task)
}
