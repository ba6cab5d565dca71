/// Task lifecycle endpoints
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks` - List tasks (members see only their own assignments)
/// - `PUT /api/tasks/:id/status` - Set status
/// - `PUT /api/tasks/:id/reassign` - Reassign to another user
/// - `PUT /api/tasks/:id` - Partial edit (admin or current assignee)
/// - `DELETE /api/tasks/:id` - Delete (admin/manager)
/// - `GET /api/tasks/:id/history` - Task history, newest first
///
/// Assignees arrive either as an email (resolved here, 404 if unmatched)
/// or as a raw id, which is taken as-is.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tasktrack_shared::{
    auth::{
        actor::Actor,
        policy::{self, Action},
    },
    models::{
        history::{HistoryEntry, HistoryWithActor},
        task::{NewTask, Task, TaskEdit, TaskPriority, TaskStatus, TaskWithRefs},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

use super::users::MessageResponse;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description (stored as "" when absent)
    pub description: Option<String>,

    /// Priority (defaults to medium)
    pub priority: Option<TaskPriority>,

    /// Optional due date (YYYY-MM-DD)
    pub due_date: Option<NaiveDate>,

    /// Assignee email, resolved to an id before any write
    pub assignee_email: Option<String>,

    /// Assignee id, taken as-is when no email is given
    pub assignee_id: Option<Uuid>,

    /// Optional category
    pub category_id: Option<Uuid>,
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status
    pub status: TaskStatus,
}

/// Reassign request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignRequest {
    /// New assignee email, resolved to an id before any write
    pub assignee_email: Option<String>,

    /// New assignee id, taken as-is when no email is given
    pub assignee_id: Option<Uuid>,
}

/// Partial edit request; absent fields keep their prior values
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date
    pub due_date: Option<NaiveDate>,

    /// New category
    pub category_id: Option<Uuid>,
}

/// Response for task creation: the new id plus a confirmation
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    /// Id of the created task
    pub id: Uuid,

    /// Human-readable confirmation
    pub message: String,
}

/// Resolves the assignee to an id
///
/// An email takes precedence and must match an existing user; a raw id is
/// passed through without lookup (soft reference).
async fn resolve_assignee(
    state: &AppState,
    email: Option<&str>,
    id: Option<Uuid>,
) -> ApiResult<Option<Uuid>> {
    if let Some(email) = email {
        let user = User::find_by_email(&state.db, email)
            .await?
            .ok_or_else(|| ApiError::NotFound("Assignee not found".to_string()))?;
        return Ok(Some(user.id));
    }

    Ok(id)
}

/// Creates a task
///
/// The task starts in the `open` state and a "Task created" history entry
/// is written in the same transaction.
///
/// # Errors
///
/// - `404 Not Found`: Assignee email matched no user
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<CreateTaskResponse>> {
    policy::require(actor.role, actor.id, Action::CreateTask, None)?;
    req.validate()?;

    let assignee_id =
        resolve_assignee(&state, req.assignee_email.as_deref(), req.assignee_id).await?;

    let task = Task::create(
        &state.db,
        NewTask {
            title: req.title,
            description: req.description.unwrap_or_default(),
            priority: req.priority.unwrap_or(TaskPriority::Medium),
            due_date: req.due_date,
            assignee_id,
            category_id: req.category_id,
        },
        actor.id,
    )
    .await?;

    Ok(Json(CreateTaskResponse {
        id: task.id,
        message: "Task created".to_string(),
    }))
}

/// Lists tasks visible to the actor, newest first
///
/// Admins and managers see everything; members see only tasks assigned to
/// them.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<TaskWithRefs>>> {
    policy::require(actor.role, actor.id, Action::ListTasks, None)?;

    let tasks = Task::list(&state.db, actor.visibility_filter()).await?;
    Ok(Json(tasks))
}

/// Sets a task's status
///
/// Any of the three statuses may be set from any current status; each call
/// appends its own history entry.
///
/// # Errors
///
/// - `404 Not Found`: No such task
pub async fn update_status(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::UpdateTaskStatus, None)?;

    let updated = Task::update_status(&state.db, id, req.status, actor.id).await?;
    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Status updated".to_string(),
    }))
}

/// Reassigns a task to another user
///
/// # Errors
///
/// - `400 Bad Request`: Neither email nor id supplied
/// - `404 Not Found`: No such task, or assignee email matched no user
pub async fn reassign_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReassignRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ReassignTask, None)?;

    let assignee_id =
        resolve_assignee(&state, req.assignee_email.as_deref(), req.assignee_id)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Assignee is required".to_string()))?;

    let updated = Task::reassign(&state.db, id, assignee_id, actor.id).await?;
    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task reassigned".to_string(),
    }))
}

/// Partially edits a task
///
/// Only the admin or the task's current assignee may edit. Absent fields
/// keep their prior values; an edit cannot clear a field.
///
/// # Errors
///
/// - `403 Forbidden`: Actor is neither admin nor the current assignee
/// - `404 Not Found`: No such task
/// - `422 Unprocessable Entity`: Validation failed
pub async fn edit_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    // Existence is checked before authorization so a missing task reads as
    // 404 rather than 403
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    policy::require(actor.role, actor.id, Action::EditTask, task.assignee_id)?;
    req.validate()?;

    Task::edit(
        &state.db,
        id,
        TaskEdit {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            category_id: req.category_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(MessageResponse {
        message: "Task updated".to_string(),
    }))
}

/// Deletes a task
///
/// History entries for the task are kept.
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin or manager
/// - `404 Not Found`: No such task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::DeleteTask, None)?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}

/// Lists a task's history, newest first, with actor names joined
pub async fn task_history(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<HistoryWithActor>>> {
    policy::require(actor.role, actor.id, Action::ListTasks, None)?;

    let entries = HistoryEntry::list_for_task(&state.db, id).await?;
    Ok(Json(entries))
}
