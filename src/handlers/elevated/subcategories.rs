use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::database::models::subcategory::{
    CreateSubcategoryRequest, Subcategory, UpdateSubcategoryRequest,
};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::{CategoryService, SubcategoryService};

/// POST /api/subcategories
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateSubcategoryRequest>,
) -> Result<(StatusCode, Json<Subcategory>), ApiError> {
    payload.validate()?;

    let categories = CategoryService::new().await?;
    if categories.get(payload.category_id).await?.is_none() {
        return Err(ApiError::bad_request("Parent category does not exist"));
    }

    let subcategories = SubcategoryService::new().await?;
    let subcategory = subcategories
        .create(&payload.name, &payload.slug(), payload.category_id)
        .await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "subcategory",
        Some(subcategory.id),
        Some(subcategory.name.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// PUT /api/subcategories/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateSubcategoryRequest>,
) -> Result<Json<Subcategory>, ApiError> {
    payload.validate()?;

    if let Some(category_id) = payload.category_id {
        let categories = CategoryService::new().await?;
        if categories.get(category_id).await?.is_none() {
            return Err(ApiError::bad_request("Parent category does not exist"));
        }
    }

    let subcategories = SubcategoryService::new().await?;
    let subcategory = subcategories.update(id, &payload).await?;
    log_activity(Some(auth.user_id), "update", "subcategory", Some(id), None).await;

    Ok(Json(subcategory))
}

/// DELETE /api/subcategories/:id - Refused while videos reference the row.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let subcategories = SubcategoryService::new().await?;

    if !subcategories.delete(id).await? {
        return Err(ApiError::conflict("Subcategory still has videos"));
    }
    log_activity(Some(auth.user_id), "delete", "subcategory", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}
