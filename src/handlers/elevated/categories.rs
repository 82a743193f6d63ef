use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::database::models::category::{
    Category, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::CategoryService;

/// POST /api/categories
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    payload.validate()?;

    let categories = CategoryService::new().await?;
    if let Some(parent_id) = payload.parent_id {
        if categories.get(parent_id).await?.is_none() {
            return Err(ApiError::bad_request("Parent category does not exist"));
        }
    }

    let category = categories
        .create(&payload.name, &payload.slug(), payload.parent_id)
        .await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "category",
        Some(category.id),
        Some(category.name.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    payload.validate()?;

    let categories = CategoryService::new().await?;
    if let Some(parent_id) = payload.parent_id {
        if parent_id == id {
            return Err(ApiError::bad_request("A category cannot be its own parent"));
        }
        if categories.get(parent_id).await?.is_none() {
            return Err(ApiError::bad_request("Parent category does not exist"));
        }
    }

    let category = categories.update(id, &payload).await?;
    log_activity(Some(auth.user_id), "update", "category", Some(id), None).await;

    Ok(Json(category))
}

/// DELETE /api/categories/:id - Refused while videos, subcategories, or
/// child categories still reference the row.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let categories = CategoryService::new().await?;

    if !categories.delete(id).await? {
        return Err(ApiError::conflict(
            "Category still has videos or subcategories",
        ));
    }
    log_activity(Some(auth.user_id), "delete", "category", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}
