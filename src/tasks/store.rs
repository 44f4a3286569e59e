/**
 * Positional Task Store
 *
 * In-memory task table with the position bookkeeping for the kanban board.
 * Positions are a sort hint, not a uniqueness-enforced key: the move path
 * shifts the destination partition and then writes the moved task as two
 * steps, and deletes never renumber survivors, so transient duplicates and
 * gaps are both legal. Reads break ties by creation time, then id.
 *
 * Each mutation touches task records under a single writer lock, which
 * stands in for the per-document atomicity of the backing document store.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Task, TaskPriority, TaskStatus};

/// Fields accepted when creating a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub project: Uuid,
    pub assignee: Option<Uuid>,
    pub milestone: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_by: Uuid,
}

/// Partial update applied to a task; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<Uuid>,
    pub milestone: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

/// Filters for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<Uuid>,
}

/// In-memory positional task store
///
/// Cheap to clone; all clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

/// Sort key within a partition: position first, creation time and id as
/// tie-breaks for the duplicate positions the weak write path can produce.
fn board_order(a: &Task, b: &Task) -> std::cmp::Ordering {
    a.position
        .cmp(&b.position)
        .then(a.created_at.cmp(&b.created_at))
        .then(a.id.cmp(&b.id))
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task at the tail of its (project, status) partition
    ///
    /// The new position is one past the current maximum in the partition,
    /// or 0 when the partition is empty.
    pub async fn create(&self, new: NewTask) -> Task {
        let mut tasks = self.tasks.write().await;
        let status = new.status.unwrap_or_default();
        let position = tasks
            .values()
            .filter(|t| t.project == new.project && t.status == status)
            .map(|t| t.position)
            .max()
            .map_or(0, |max| max.saturating_add(1));

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            status,
            priority: new.priority.unwrap_or_default(),
            project: new.project,
            assignee: new.assignee,
            created_by: new.created_by,
            milestone: new.milestone,
            due_date: new.due_date,
            tags: new.tags,
            position,
            created_at: now,
            updated_at: now,
        };
        tasks.insert(task.id, task.clone());
        task
    }

    /// Fetch a task by id
    pub async fn get(&self, id: Uuid) -> Option<Task> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// List tasks matching a filter, in board order
    pub async fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| filter.project.is_none_or(|p| t.project == p))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.priority.is_none_or(|p| t.priority == p))
            .filter(|t| filter.assignee.is_none_or(|a| t.assignee == Some(a)))
            .cloned()
            .collect();
        result.sort_by(board_order);
        result
    }

    /// List the tasks linked to a milestone
    pub async fn list_by_milestone(&self, milestone: Uuid) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .values()
            .filter(|t| t.milestone == Some(milestone))
            .cloned()
            .collect()
    }

    /// Apply a partial update to a task
    pub async fn update(&self, id: Uuid, changes: TaskChanges) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id)?;
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(assignee) = changes.assignee {
            task.assignee = Some(assignee);
        }
        if let Some(milestone) = changes.milestone {
            task.milestone = Some(milestone);
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(tags) = changes.tags {
            task.tags = tags;
        }
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    /// Reassign a task's status without repositioning it
    ///
    /// The position is carried over as-is; a collision in the destination
    /// partition is tolerated and resolved by the read-side tie-break.
    pub async fn set_status(&self, id: Uuid, status: TaskStatus) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id)?;
        task.status = status;
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    /// Move a task to (status, position), shifting the destination partition
    ///
    /// Every other task in the destination (project, status) partition with
    /// position >= `position` is incremented by one to make room, then the
    /// moved task's own status and position are written. This is a simple
    /// shift-insert, not a gap-free renumbering, and the two steps are not
    /// one atomic batch.
    pub async fn move_task(&self, id: Uuid, status: TaskStatus, position: u32) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let project = tasks.get(&id)?.project;

        for other in tasks.values_mut() {
            if other.id != id
                && other.project == project
                && other.status == status
                && other.position >= position
            {
                other.position = other.position.saturating_add(1);
            }
        }

        let task = tasks.get_mut(&id)?;
        task.status = status;
        task.position = position;
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    /// Delete a task
    ///
    /// Survivors keep their positions; the gap left behind is intentional,
    /// ordering survives it and contiguity is not guaranteed.
    pub async fn remove(&self, id: Uuid) -> Option<Task> {
        self.tasks.write().await.remove(&id)
    }

    /// Unlink every task referencing a milestone
    pub async fn detach_milestone(&self, milestone: Uuid) -> usize {
        let mut tasks = self.tasks.write().await;
        let mut detached = 0;
        for task in tasks.values_mut() {
            if task.milestone == Some(milestone) {
                task.milestone = None;
                task.updated_at = Utc::now();
                detached += 1;
            }
        }
        detached
    }

}
