/// User management endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Create a user (admin/manager)
/// - `GET /api/users` - List users (admin/manager)
/// - `DELETE /api/users/:id` - Delete a user (admin)
/// - `PUT /api/users/:id/password` - Reset another user's password (admin/manager)
/// - `PUT /api/users/me/password` - Change own password (old password verified)
///
/// Every mutating handler checks the authorization policy exactly once
/// before touching the store.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tasktrack_shared::{
    auth::{
        actor::Actor,
        password,
        policy::{self, Action},
    },
    models::user::{CreateUser, Role, User, UserInfo},
};
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (checked against the credential policy)
    pub password: String,

    /// Role
    pub role: Role,
}

/// Reset password request (admin/manager resetting someone else's)
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    /// New password
    pub password: String,
}

/// Change own password request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password, verified before anything changes
    pub old_password: String,

    /// New password (checked against the credential policy)
    pub new_password: String,
}

/// Message response for mutations with no body to return
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Creates a new user account
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin or manager
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed or weak password
pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::CreateUser, None)?;
    req.validate()?;

    password::validate_password(&req.password, &req.name, &req.email)?;
    let password_hash = password::hash_password_async(req.password).await?;

    User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "User created".to_string(),
    }))
}

/// Lists all users without their credentials
pub async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<UserInfo>>> {
    policy::require(actor.role, actor.id, Action::ListUsers, None)?;

    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Deletes a user account
///
/// Tasks assigned to or created by the user are left in place with a
/// dangling reference.
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin
/// - `404 Not Found`: No such user
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::DeleteUser, None)?;

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

/// Resets another user's password
///
/// The target's name and email feed the credential policy, so the new
/// password cannot contain the target's own identity.
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin or manager
/// - `404 Not Found`: No such user
/// - `422 Unprocessable Entity`: Weak password
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ResetOtherPassword, None)?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    password::validate_password(&req.password, &user.name, &user.email)?;
    let password_hash = password::hash_password_async(req.password).await?;

    User::set_password_hash(&state.db, id, &password_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password reset".to_string(),
    }))
}

/// Changes the authenticated user's own password
///
/// # Errors
///
/// - `401 Unauthorized`: Old password is wrong
/// - `422 Unprocessable Entity`: Weak new password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ChangeOwnPassword, None)?;

    let user = User::find_by_id(&state.db, actor.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid =
        password::verify_password_async(req.old_password, user.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    password::validate_password(&req.new_password, &user.name, &user.email)?;
    let password_hash = password::hash_password_async(req.new_password).await?;

    User::set_password_hash(&state.db, actor.id, &password_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}
