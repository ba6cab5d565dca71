/// Category management endpoints
///
/// # Endpoints
///
/// - `GET /api/categories` - List categories (any authenticated role)
/// - `POST /api/categories` - Create a category (admin)
/// - `PUT /api/categories/:id` - Rename a category (admin)
/// - `DELETE /api/categories/:id` - Delete a category (admin)
///
/// Deleting a category leaves tasks pointing at it untouched; the stale
/// reference simply renders as uncategorized.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use tasktrack_shared::{
    auth::{
        actor::Actor,
        policy::{self, Action},
    },
    models::category::Category,
};
use uuid::Uuid;
use validator::Validate;

use super::users::MessageResponse;

/// Create/rename category request
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Category name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Lists all categories ordered by name
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<Category>>> {
    policy::require(actor.role, actor.id, Action::ListCategories, None)?;

    let categories = Category::list(&state.db).await?;
    Ok(Json(categories))
}

/// Creates a category
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin
/// - `409 Conflict`: Name already exists
pub async fn create_category(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ManageCategories, None)?;
    req.validate()?;

    Category::create(&state.db, &req.name).await?;
    Ok(Json(MessageResponse {
        message: "Category created".to_string(),
    }))
}

/// Renames a category
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin
/// - `404 Not Found`: No such category
/// - `409 Conflict`: Name already exists
pub async fn rename_category(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ManageCategories, None)?;
    req.validate()?;

    let renamed = Category::rename(&state.db, id, &req.name).await?;
    if !renamed {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Category updated".to_string(),
    }))
}

/// Deletes a category
///
/// # Errors
///
/// - `403 Forbidden`: Actor is not admin
/// - `404 Not Found`: No such category
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    policy::require(actor.role, actor.id, Action::ManageCategories, None)?;

    let deleted = Category::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Category deleted".to_string(),
    }))
}
