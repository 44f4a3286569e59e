//! Milestones
//!
//! Milestone management: the in-memory store, the derived progress
//! computation, and the REST handlers under `/api/milestones`.

pub mod handlers;
pub mod progress;
pub mod store;

pub use progress::calculate_progress;
pub use store::{MilestoneChanges, MilestoneStore, NewMilestone};
