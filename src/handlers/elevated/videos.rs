use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::database::models::video::{CreateVideoRequest, UpdateVideoRequest, Video};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::{CategoryService, SubcategoryService, VideoService};

/// POST /api/videos
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    payload.validate()?;
    check_placement(payload.category_id, payload.subcategory_id).await?;

    let videos = VideoService::new().await?;
    let video = videos.create(&payload).await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "video",
        Some(video.id),
        Some(video.title.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /api/videos/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateVideoRequest>,
) -> Result<Json<Video>, ApiError> {
    payload.validate()?;
    check_placement(payload.category_id, payload.subcategory_id).await?;

    let videos = VideoService::new().await?;
    let video = videos.update(id, &payload).await?;
    log_activity(Some(auth.user_id), "update", "video", Some(id), None).await;

    Ok(Json(video))
}

/// DELETE /api/videos/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let videos = VideoService::new().await?;
    if !videos.delete(id).await? {
        return Err(ApiError::not_found("Video not found"));
    }
    log_activity(Some(auth.user_id), "delete", "video", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Referenced category/subcategory must exist, and a subcategory given
/// together with a category must actually belong to it.
async fn check_placement(
    category_id: Option<i32>,
    subcategory_id: Option<i32>,
) -> Result<(), ApiError> {
    if let Some(category_id) = category_id {
        let categories = CategoryService::new().await?;
        if categories.get(category_id).await?.is_none() {
            return Err(ApiError::bad_request("Category does not exist"));
        }
    }

    if let Some(subcategory_id) = subcategory_id {
        let subcategories = SubcategoryService::new().await?;
        let subcategory = subcategories
            .get(subcategory_id)
            .await?
            .ok_or_else(|| ApiError::bad_request("Subcategory does not exist"))?;

        if let Some(category_id) = category_id {
            if subcategory.category_id != category_id {
                return Err(ApiError::bad_request(
                    "Subcategory does not belong to the given category",
                ));
            }
        }
    }

    Ok(())
}
