use axum::{
    extract::{Path, Query},
    response::Json,
};

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::tag::Tag;
use crate::error::ApiError;
use crate::services::TagService;

/// GET /api/tags
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Page<Tag>>, ApiError> {
    let tags = TagService::new().await?;
    let (data, total) = tags.list(&query).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// GET /api/tags/:id
pub async fn get(Path(id): Path<i32>) -> Result<Json<Tag>, ApiError> {
    let tags = TagService::new().await?;
    let tag = tags
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;
    Ok(Json(tag))
}
