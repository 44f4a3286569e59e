/**
 * API Route Handlers
 *
 * This module wires the REST endpoints for tasks and milestones. Every
 * route defined here sits behind the JWT auth middleware, which is layered
 * on in `router.rs`.
 *
 * # Routes
 *
 * ## Tasks
 * - `GET /api/tasks` - List tasks with filters and pagination
 * - `POST /api/tasks` - Create a task
 * - `GET /api/tasks/{id}` - Fetch a task
 * - `PUT /api/tasks/{id}` - Update task fields
 * - `DELETE /api/tasks/{id}` - Delete a task
 * - `PATCH /api/tasks/{id}/status` - Reassign status
 * - `PATCH /api/tasks/{id}/move` - Kanban move (status + position)
 *
 * ## Milestones
 * - `GET /api/milestones` - List milestones
 * - `POST /api/milestones` - Create a milestone
 * - `GET /api/milestones/{id}` - Fetch a milestone with fresh progress
 * - `PUT /api/milestones/{id}` - Update milestone fields
 * - `DELETE /api/milestones/{id}` - Delete a milestone
 * - `PATCH /api/milestones/{id}/complete` - Mark complete
 */

use axum::middleware;
use axum::routing::{get, patch};
use axum::Router;

use crate::middleware::auth_middleware;
use crate::milestones::handlers::{
    complete_milestone, create_milestone, delete_milestone, get_milestone, list_milestones,
    update_milestone,
};
use crate::server::state::AppState;
use crate::tasks::handlers::{
    create_task, delete_task, get_task, list_tasks, move_task, update_task, update_task_status,
};

/// Configure API routes
///
/// All routes here require a valid JWT in the `Authorization` header;
/// the auth middleware is applied to the whole group.
pub fn configure_api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Task endpoints
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/status", patch(update_task_status))
        .route("/api/tasks/{id}/move", patch(move_task))
        // Milestone endpoints
        .route("/api/milestones", get(list_milestones).post(create_milestone))
        .route(
            "/api/milestones/{id}",
            get(get_milestone)
                .put(update_milestone)
                .delete(delete_milestone),
        )
        .route("/api/milestones/{id}/complete", patch(complete_milestone))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
