//! Entity Models
//!
//! This module defines the entities shared between the REST handlers, the
//! in-memory stores, and the real-time event payloads.
//!
//! - **`task`** - Kanban tasks with status/position ordering
//! - **`milestone`** - Project milestones with derived progress

pub mod milestone;
pub mod task;

pub use milestone::{Milestone, MilestoneStatus};
pub use task::{Task, TaskPriority, TaskStatus};
