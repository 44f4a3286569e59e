/**
 * Milestone Store
 *
 * In-memory milestone table. Progress values are written by the handlers
 * after recomputing them from the task store; the store itself never
 * derives anything.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::milestone::DEFAULT_MILESTONE_COLOR;
use crate::models::{Milestone, MilestoneStatus};

/// Fields accepted when creating a milestone
#[derive(Debug, Clone)]
pub struct NewMilestone {
    pub title: String,
    pub description: Option<String>,
    pub project: Uuid,
    pub due_date: DateTime<Utc>,
    pub color: Option<String>,
    pub created_by: Uuid,
}

/// Partial update applied to a milestone; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct MilestoneChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub color: Option<String>,
}

/// Filters for listing milestones
#[derive(Debug, Clone, Default)]
pub struct MilestoneFilter {
    pub project: Option<Uuid>,
    pub status: Option<MilestoneStatus>,
}

/// In-memory milestone store
///
/// Cheap to clone; all clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MilestoneStore {
    milestones: Arc<RwLock<HashMap<Uuid, Milestone>>>,
}

impl MilestoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a milestone in the planning state
    pub async fn create(&self, new: NewMilestone) -> Milestone {
        let now = Utc::now();
        let milestone = Milestone {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            project: new.project,
            status: MilestoneStatus::default(),
            start_date: now,
            due_date: new.due_date,
            completed_date: None,
            progress: 0,
            created_by: new.created_by,
            color: new.color.unwrap_or_else(|| DEFAULT_MILESTONE_COLOR.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.milestones
            .write()
            .await
            .insert(milestone.id, milestone.clone());
        milestone
    }

    /// Fetch a milestone by id
    pub async fn get(&self, id: Uuid) -> Option<Milestone> {
        self.milestones.read().await.get(&id).cloned()
    }

    /// List milestones matching a filter, ordered by due date
    pub async fn list(&self, filter: &MilestoneFilter) -> Vec<Milestone> {
        let milestones = self.milestones.read().await;
        let mut result: Vec<Milestone> = milestones
            .values()
            .filter(|m| filter.project.is_none_or(|p| m.project == p))
            .filter(|m| filter.status.is_none_or(|s| m.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        result
    }

    /// Apply a partial update and the freshly computed progress
    pub async fn update(
        &self,
        id: Uuid,
        changes: MilestoneChanges,
        progress: u8,
    ) -> Option<Milestone> {
        let mut milestones = self.milestones.write().await;
        let milestone = milestones.get_mut(&id)?;
        if let Some(title) = changes.title {
            milestone.title = title;
        }
        if let Some(description) = changes.description {
            milestone.description = Some(description);
        }
        if let Some(status) = changes.status {
            milestone.status = status;
        }
        if let Some(due_date) = changes.due_date {
            milestone.due_date = due_date;
        }
        if let Some(color) = changes.color {
            milestone.color = color;
        }
        milestone.progress = progress;
        milestone.updated_at = Utc::now();
        Some(milestone.clone())
    }

    /// Mark a milestone completed with full progress
    pub async fn complete(&self, id: Uuid) -> Option<Milestone> {
        let mut milestones = self.milestones.write().await;
        let milestone = milestones.get_mut(&id)?;
        milestone.status = MilestoneStatus::Completed;
        milestone.completed_date = Some(Utc::now());
        milestone.progress = 100;
        milestone.updated_at = Utc::now();
        Some(milestone.clone())
    }

    /// Delete a milestone
    pub async fn remove(&self, id: Uuid) -> Option<Milestone> {
        self.milestones.write().await.remove(&id)
    }
}
