use axum::{
    extract::{Path, Query},
    response::Json,
};
use serde::Deserialize;

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::subcategory::Subcategory;
use crate::error::ApiError;
use crate::services::SubcategoryService;

#[derive(Debug, Deserialize)]
pub struct SubcategoryListQuery {
    pub category_id: Option<i32>,
}

/// GET /api/subcategories?category_id=
pub async fn list(
    Query(scope): Query<SubcategoryListQuery>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Subcategory>>, ApiError> {
    let subcategories = SubcategoryService::new().await?;
    let (data, total) = subcategories.list(&query, scope.category_id).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// GET /api/subcategories/:id
pub async fn get(Path(id): Path<i32>) -> Result<Json<Subcategory>, ApiError> {
    let subcategories = SubcategoryService::new().await?;
    let subcategory = subcategories
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subcategory not found"))?;
    Ok(Json(subcategory))
}
