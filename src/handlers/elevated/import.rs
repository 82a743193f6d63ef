use axum::{response::Json, Extension};
use serde::Deserialize;

use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::VideoService;
use crate::youtube::{import_playlist, ImportSummary, YouTubeDataApi};

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub playlist_url: String,
}

/// POST /api/import/youtube - Import a playlist; idempotent per video id.
pub async fn import_youtube(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<ImportRequest>,
) -> Result<Json<ImportSummary>, ApiError> {
    if payload.playlist_url.trim().is_empty() {
        return Err(ApiError::bad_request("playlist_url is required"));
    }

    let source = YouTubeDataApi::from_config()?;
    let videos = VideoService::new().await?;
    let summary = import_playlist(&source, &videos, &payload.playlist_url).await?;

    log_activity(
        Some(auth.user_id),
        "import",
        "video",
        None,
        Some(format!(
            "{}: {} imported, {} updated, {} failed",
            payload.playlist_url.trim(),
            summary.imported,
            summary.updated,
            summary.failed
        )),
    )
    .await;

    Ok(Json(summary))
}
