use axum::{
    extract::{Path, Query},
    response::Json,
};

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::video::{Video, VideoDetail, VideoFilter};
use crate::error::ApiError;
use crate::services::{RatingService, VideoService};

/// GET /api/videos - Paginated catalog listing with optional filters.
pub async fn list(
    Query(query): Query<ListQuery>,
    Query(filter): Query<VideoFilter>,
) -> Result<Json<Page<Video>>, ApiError> {
    let videos = VideoService::new().await?;
    let (data, total) = videos.list(&query, &filter).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// GET /api/videos/:id - Single video with tags and rating aggregate.
/// Each read bumps the view counter.
pub async fn get(Path(id): Path<i32>) -> Result<Json<VideoDetail>, ApiError> {
    let videos = VideoService::new().await?;

    let mut video = videos
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    videos.increment_views(id).await?;
    video.views += 1;

    let tags = videos.tags_for(id).await?;

    let ratings = RatingService::new().await?;
    let average_rating = ratings.average_for_video(id).await?;
    let rating_count = ratings.count_for_video(id).await?;

    Ok(Json(VideoDetail {
        video,
        tags,
        average_rating,
        rating_count,
    }))
}
