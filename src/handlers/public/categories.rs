use axum::{
    extract::{Path, Query},
    response::Json,
};

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::category::Category;
use crate::error::ApiError;
use crate::services::CategoryService;

/// GET /api/categories
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Page<Category>>, ApiError> {
    let categories = CategoryService::new().await?;
    let (data, total) = categories.list(&query).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// GET /api/categories/:id
pub async fn get(Path(id): Path<i32>) -> Result<Json<Category>, ApiError> {
    let categories = CategoryService::new().await?;
    let category = categories
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;
    Ok(Json(category))
}
