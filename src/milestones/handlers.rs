/**
 * Milestone REST Handlers
 *
 * CRUD surface under `/api/milestones`. Mutations broadcast
 * `milestone:created` / `milestone:updated` / `milestone:deleted` to the
 * project room. Progress is recomputed from the task store on update and
 * on single-milestone reads; the stored value is a display snapshot, not
 * an invariant kept perpetually correct.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::milestones::progress::calculate_progress;
use crate::milestones::store::{MilestoneChanges, MilestoneFilter, NewMilestone};
use crate::models::{Milestone, MilestoneStatus};
use crate::realtime::{EventName, RoomEvent};
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Query parameters for GET /api/milestones
#[derive(Debug, Deserialize)]
pub struct MilestoneListQuery {
    pub project: Option<Uuid>,
    pub status: Option<MilestoneStatus>,
}

/// Body of POST /api/milestones
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project: Uuid,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Body of PUT /api/milestones/{id}; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub color: Option<String>,
}

/// GET /api/milestones - list milestones ordered by due date
pub async fn list_milestones(
    State(state): State<AppState>,
    Query(query): Query<MilestoneListQuery>,
) -> Result<Json<ApiResponse<Vec<Milestone>>>, ApiError> {
    let milestones = state
        .milestones
        .list(&MilestoneFilter {
            project: query.project,
            status: query.status,
        })
        .await;
    Ok(Json(ApiResponse::new(milestones)))
}

/// GET /api/milestones/{id} - fetch one milestone with fresh progress
pub async fn get_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Milestone>>, ApiError> {
    let mut milestone = state
        .milestones
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found("Milestone"))?;

    // Read-time recomputation; the stored snapshot is not refreshed here.
    let linked = state.tasks.list_by_milestone(id).await;
    milestone.progress = calculate_progress(&linked);

    Ok(Json(ApiResponse::new(milestone)))
}

/// POST /api/milestones - create a milestone
pub async fn create_milestone(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Milestone>>), ApiError> {
    let title = body.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::validation("title", "Milestone title is required"));
    }

    let milestone = state
        .milestones
        .create(NewMilestone {
            title,
            description: body.description,
            project: body.project,
            due_date: body.due_date,
            color: body.color,
            created_by: user.user_id,
        })
        .await;

    state
        .relay
        .broadcast(
            milestone.project,
            RoomEvent::entity(EventName::MilestoneCreated, &milestone)?,
        )
        .await;
    tracing::info!(
        "[Milestones] Milestone created: {} in project {}",
        milestone.title,
        milestone.project
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            milestone,
            "Milestone created successfully",
        )),
    ))
}

/// PUT /api/milestones/{id} - partial update with progress recomputation
pub async fn update_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMilestoneRequest>,
) -> Result<Json<ApiResponse<Milestone>>, ApiError> {
    if state.milestones.get(id).await.is_none() {
        return Err(ApiError::not_found("Milestone"));
    }

    let linked = state.tasks.list_by_milestone(id).await;
    let progress = calculate_progress(&linked);

    let milestone = state
        .milestones
        .update(
            id,
            MilestoneChanges {
                title: body.title,
                description: body.description,
                status: body.status,
                due_date: body.due_date,
                color: body.color,
            },
            progress,
        )
        .await
        .ok_or_else(|| ApiError::not_found("Milestone"))?;

    state
        .relay
        .broadcast(
            milestone.project,
            RoomEvent::entity(EventName::MilestoneUpdated, &milestone)?,
        )
        .await;
    tracing::info!("[Milestones] Milestone updated: {}", milestone.title);

    Ok(Json(ApiResponse::with_message(
        milestone,
        "Milestone updated successfully",
    )))
}

/// PATCH /api/milestones/{id}/complete - mark complete
pub async fn complete_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Milestone>>, ApiError> {
    let milestone = state
        .milestones
        .complete(id)
        .await
        .ok_or_else(|| ApiError::not_found("Milestone"))?;

    state
        .relay
        .broadcast(
            milestone.project,
            RoomEvent::entity(EventName::MilestoneUpdated, &milestone)?,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        milestone,
        "Milestone marked as complete",
    )))
}

/// DELETE /api/milestones/{id} - delete and unlink referencing tasks
pub async fn delete_milestone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let milestone = state
        .milestones
        .remove(id)
        .await
        .ok_or_else(|| ApiError::not_found("Milestone"))?;

    state.tasks.detach_milestone(id).await;

    state
        .relay
        .broadcast(
            milestone.project,
            RoomEvent::deleted(EventName::MilestoneDeleted, milestone.id),
        )
        .await;
    tracing::info!("[Milestones] Milestone deleted: {}", milestone.title);

    Ok(Json(ApiResponse::with_message(
        Value::Null,
        "Milestone deleted successfully",
    )))
}
