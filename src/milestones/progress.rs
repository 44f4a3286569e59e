/**
 * Milestone Progress
 *
 * Progress is the percentage of a milestone's linked tasks whose status is
 * `done`. It is derived on demand from the current task set - a read-time
 * or explicit-trigger computation, never an incrementally maintained value.
 */

use crate::models::{Task, TaskStatus};

/// Percentage of tasks completed, rounded to the nearest integer
///
/// An empty task set is 0% complete.
pub fn calculate_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    ((done as f64 / tasks.len() as f64) * 100.0).round() as u8
}
