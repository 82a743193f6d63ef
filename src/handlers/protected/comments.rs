use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::database::models::comment::{Comment, CreateCommentRequest, UpdateCommentRequest};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::{CommentService, VideoService};
use crate::throttle::CommentThrottle;

/// POST /api/comments - Create a comment, subject to the per-user cooldown.
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    payload.validate()?;

    if let Err(wait_secs) = CommentThrottle::global().check(auth.user_id) {
        return Err(ApiError::too_many_requests(
            "You are commenting too quickly",
            wait_secs,
        ));
    }

    let videos = VideoService::new().await?;
    if videos.get(payload.video_id).await?.is_none() {
        return Err(ApiError::not_found("Video not found"));
    }

    let comments = CommentService::new().await?;
    let comment = comments
        .create(payload.video_id, auth.user_id, payload.content.trim())
        .await?;

    CommentThrottle::global().record(auth.user_id);
    log_activity(Some(auth.user_id), "create", "comment", Some(comment.id), None).await;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/comments/:id - Owner or admin only.
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    payload.validate()?;

    let comments = CommentService::new().await?;
    let existing = comments
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if !auth.can_manage(existing.user_id) {
        return Err(ApiError::forbidden("You can only edit your own comments"));
    }

    let comment = comments.update(id, payload.content.trim()).await?;
    log_activity(Some(auth.user_id), "update", "comment", Some(id), None).await;

    Ok(Json(comment))
}

/// DELETE /api/comments/:id - Owner or admin only.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let comments = CommentService::new().await?;
    let existing = comments
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if !auth.can_manage(existing.user_id) {
        return Err(ApiError::forbidden("You can only delete your own comments"));
    }

    comments.delete(id).await?;
    log_activity(Some(auth.user_id), "delete", "comment", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}
