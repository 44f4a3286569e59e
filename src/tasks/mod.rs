//! Tasks
//!
//! Kanban task management: the positional store that keeps per-project,
//! per-status ordered lists, the move coordinator that drives the
//! validate/persist/relay pipeline, and the REST handlers.
//!
//! - **`store`** - in-memory positional task store
//! - **`coordinator`** - move request orchestration
//! - **`handlers`** - REST endpoints under `/api/tasks`

pub mod coordinator;
pub mod handlers;
pub mod store;

pub use coordinator::MoveTaskRequest;
pub use store::{NewTask, TaskChanges, TaskFilter, TaskStore};
