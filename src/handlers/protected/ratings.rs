use axum::{extract::Query, response::Json, Extension};
use serde::Deserialize;

use crate::database::models::rating::{RateVideoRequest, RatingSummary};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::{RatingService, VideoService};

#[derive(Debug, Deserialize)]
pub struct RatingQuery {
    pub video_id: Option<i32>,
}

/// GET /api/ratings?video_id= - The caller's rating plus the aggregate.
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<RatingQuery>,
) -> Result<Json<RatingSummary>, ApiError> {
    let video_id = query
        .video_id
        .ok_or_else(|| ApiError::bad_request("video_id query parameter is required"))?;

    let ratings = RatingService::new().await?;
    Ok(Json(ratings.summary(video_id, auth.user_id).await?))
}

/// POST /api/ratings - Upsert the caller's score for a video; a repeat
/// submission replaces the previous score rather than adding a row.
pub async fn rate(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<RateVideoRequest>,
) -> Result<Json<RatingSummary>, ApiError> {
    payload.validate()?;

    let videos = VideoService::new().await?;
    if videos.get(payload.video_id).await?.is_none() {
        return Err(ApiError::not_found("Video not found"));
    }

    let ratings = RatingService::new().await?;
    ratings
        .upsert(payload.video_id, auth.user_id, payload.score)
        .await?;

    log_activity(
        Some(auth.user_id),
        "rate",
        "video",
        Some(payload.video_id),
        Some(format!("score {}", payload.score)),
    )
    .await;

    Ok(Json(ratings.summary(payload.video_id, auth.user_id).await?))
}
