/**
 * Task REST Handlers
 *
 * CRUD surface under `/api/tasks`, protected by the auth middleware. Every
 * successful mutation side-effects a broadcast to the task's project room:
 * `task:created`, `task:updated`, `task:moved`, or `task:deleted`. The
 * broadcast goes to the entire room - the actor's own socket, being a
 * separate channel from the REST request, receives the event too.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Task, TaskPriority, TaskStatus};
use crate::realtime::{EventName, RoomEvent};
use crate::response::{paginate, ApiResponse, PaginationMeta};
use crate::server::state::AppState;
use crate::tasks::coordinator::{self, MoveTaskRequest};
use crate::tasks::store::{NewTask, TaskChanges, TaskFilter};

/// Query parameters for GET /api/tasks
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub project: Option<Uuid>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<Uuid>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Page of tasks with pagination metadata
#[derive(Debug, Serialize)]
pub struct TaskListData {
    pub tasks: Vec<Task>,
    pub pagination: PaginationMeta,
}

/// Body of POST /api/tasks
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    pub project: Uuid,
    #[serde(default)]
    pub assignee: Option<Uuid>,
    #[serde(default)]
    pub milestone: Option<Uuid>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of PUT /api/tasks/{id}; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<Uuid>,
    pub milestone: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

/// Body of PATCH /api/tasks/{id}/status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/tasks - list tasks with filters and pagination
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<ApiResponse<TaskListData>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(|s| TaskStatus::parse(s).ok_or_else(|| ApiError::validation("status", "Invalid status")))
        .transpose()?;
    let priority = query
        .priority
        .as_deref()
        .map(|p| {
            TaskPriority::parse(p).ok_or_else(|| ApiError::validation("priority", "Invalid priority"))
        })
        .transpose()?;

    let filter = TaskFilter {
        project: query.project,
        status,
        priority,
        assignee: query.assignee,
    };
    let all = state.tasks.list(&filter).await;
    let total = all.len();

    let page = query.page.unwrap_or(1);
    let (skip, limit) = paginate(page, query.limit.unwrap_or(50));
    let tasks = all.into_iter().skip(skip).take(limit).collect();

    Ok(Json(ApiResponse::new(TaskListData {
        tasks,
        pagination: PaginationMeta::new(total, page.max(1), limit),
    })))
}

/// GET /api/tasks/{id} - fetch a single task
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.tasks.get(id).await.ok_or_else(|| ApiError::not_found("Task"))?;
    Ok(Json(ApiResponse::new(task)))
}

/// POST /api/tasks - create a task at the tail of its partition
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    let title = body.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::validation("title", "Task title is required"));
    }

    let task = state
        .tasks
        .create(NewTask {
            title,
            description: body.description,
            status: body.status,
            priority: body.priority,
            project: body.project,
            assignee: body.assignee,
            milestone: body.milestone,
            due_date: body.due_date,
            tags: body.tags,
            created_by: user.user_id,
        })
        .await;

    state
        .relay
        .broadcast(task.project, RoomEvent::entity(EventName::TaskCreated, &task)?)
        .await;
    tracing::info!("[Tasks] Task created: {} in project {}", task.title, task.project);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(task, "Task created successfully")),
    ))
}

/// PUT /api/tasks/{id} - partial update
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state
        .tasks
        .update(
            id,
            TaskChanges {
                title: body.title,
                description: body.description,
                priority: body.priority,
                assignee: body.assignee,
                milestone: body.milestone,
                due_date: body.due_date,
                tags: body.tags,
            },
        )
        .await
        .ok_or_else(|| ApiError::not_found("Task"))?;

    state
        .relay
        .broadcast(task.project, RoomEvent::entity(EventName::TaskUpdated, &task)?)
        .await;
    tracing::info!("[Tasks] Task updated: {}", task.title);

    Ok(Json(ApiResponse::with_message(task, "Task updated successfully")))
}

/// PATCH /api/tasks/{id}/status - reassign status without repositioning
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let status = TaskStatus::parse(&body.status)
        .ok_or_else(|| ApiError::validation("status", "Invalid status"))?;

    let task = state
        .tasks
        .set_status(id, status)
        .await
        .ok_or_else(|| ApiError::not_found("Task"))?;

    state
        .relay
        .broadcast(task.project, RoomEvent::entity(EventName::TaskUpdated, &task)?)
        .await;

    Ok(Json(ApiResponse::with_message(task, "Task status updated")))
}

/// PATCH /api/tasks/{id}/move - kanban move through the coordinator
pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MoveTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = coordinator::move_task(&state.tasks, &state.relay, id, body).await?;
    Ok(Json(ApiResponse::with_message(task, "Task moved successfully")))
}

/// DELETE /api/tasks/{id} - delete without renumbering survivors
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let task = state.tasks.remove(id).await.ok_or_else(|| ApiError::not_found("Task"))?;

    state
        .relay
        .broadcast(task.project, RoomEvent::deleted(EventName::TaskDeleted, task.id))
        .await;
    tracing::info!("[Tasks] Task deleted: {}", task.title);

    Ok(Json(ApiResponse::with_message(
        Value::Null,
        "Task deleted successfully",
    )))
}
