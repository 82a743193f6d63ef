use axum::{extract::Path, extract::Query, http::StatusCode, response::Json, Extension};

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::channel::{
    CreateChannelRequest, UpdateChannelRequest, WatchedChannel,
};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::ChannelService;
use crate::youtube::import::ChannelCheckResult;
use crate::youtube::{check_watched_channels, uploads_playlist_id, YouTubeDataApi};

/// GET /api/channels
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Page<WatchedChannel>>, ApiError> {
    let channels = ChannelService::new().await?;
    let (data, total) = channels.list(&query).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// POST /api/channels - Watch a channel for periodic re-import.
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateChannelRequest>,
) -> Result<(StatusCode, Json<WatchedChannel>), ApiError> {
    payload.validate()?;

    let channel_id = payload.channel_id.trim();
    if uploads_playlist_id(channel_id).is_none() {
        return Err(ApiError::bad_request(
            "channel_id must be a UC-prefixed YouTube channel id",
        ));
    }

    let channels = ChannelService::new().await?;
    let channel = channels
        .create(channel_id, payload.title.as_deref(), &payload.frequency)
        .await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "channel",
        Some(channel.id),
        Some(channel.channel_id.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(channel)))
}

/// PUT /api/channels/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateChannelRequest>,
) -> Result<Json<WatchedChannel>, ApiError> {
    payload.validate()?;

    let channels = ChannelService::new().await?;
    let channel = channels.update(id, &payload).await?;
    log_activity(Some(auth.user_id), "update", "channel", Some(id), None).await;

    Ok(Json(channel))
}

/// DELETE /api/channels/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let channels = ChannelService::new().await?;
    if !channels.delete(id).await? {
        return Err(ApiError::not_found("Channel not found"));
    }
    log_activity(Some(auth.user_id), "delete", "channel", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/channels/check - Re-import every channel whose window elapsed.
pub async fn check(
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ChannelCheckResult>>, ApiError> {
    let source = YouTubeDataApi::from_config()?;
    let results = check_watched_channels(&source).await?;

    log_activity(
        Some(auth.user_id),
        "import",
        "channel",
        None,
        Some(format!("{} channels checked", results.len())),
    )
    .await;

    Ok(Json(results))
}
