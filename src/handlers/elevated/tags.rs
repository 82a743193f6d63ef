use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::database::models::tag::{CreateTagRequest, Tag, UpdateTagRequest};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::TagService;

/// POST /api/tags
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    payload.validate()?;

    let tags = TagService::new().await?;
    let tag = tags.create(payload.name.trim(), &payload.slug()).await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "tag",
        Some(tag.id),
        Some(tag.name.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /api/tags/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateTagRequest>,
) -> Result<Json<Tag>, ApiError> {
    payload.validate()?;

    let tags = TagService::new().await?;
    let tag = tags.update(id, &payload).await?;
    log_activity(Some(auth.user_id), "update", "tag", Some(id), None).await;

    Ok(Json(tag))
}

/// DELETE /api/tags/:id - Join rows cascade, so this always succeeds for an
/// existing tag.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let tags = TagService::new().await?;
    if !tags.delete(id).await? {
        return Err(ApiError::not_found("Tag not found"));
    }
    log_activity(Some(auth.user_id), "delete", "tag", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}
