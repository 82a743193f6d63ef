use axum::{extract::Query, response::Json};
use serde::Deserialize;

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::comment::Comment;
use crate::error::ApiError;
use crate::services::CommentService;

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub video_id: Option<i32>,
}

/// GET /api/comments?video_id= - Comments for one video, newest first.
pub async fn list(
    Query(scope): Query<CommentListQuery>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Comment>>, ApiError> {
    let video_id = scope
        .video_id
        .ok_or_else(|| ApiError::bad_request("video_id query parameter is required"))?;

    let comments = CommentService::new().await?;
    let (data, total) = comments.list_for_video(video_id, &query).await?;
    Ok(Json(Page::new(data, &query, total)))
}
