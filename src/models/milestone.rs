/**
 * Milestone Model
 *
 * A milestone belongs to one project and aggregates the tasks that link to
 * it. Its `progress` percentage is derived from the fraction of linked tasks
 * with status `done`; it is recomputed on demand (read-time or on explicit
 * update), never incrementally maintained.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default accent color assigned to new milestones.
pub const DEFAULT_MILESTONE_COLOR: &str = "#3B82F6";

/// Milestone lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl Default for MilestoneStatus {
    fn default() -> Self {
        MilestoneStatus::Planning
    }
}

/// A project milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project: Uuid,
    pub status: MilestoneStatus,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    /// Percentage of linked tasks with status `done`, 0-100.
    pub progress: u8,
    pub created_by: Uuid,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
