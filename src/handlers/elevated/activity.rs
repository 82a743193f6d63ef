use axum::{extract::Query, response::Json};

use crate::api::pagination::{ListQuery, Page};
use crate::database::models::activity::{ActivityFilter, ActivityLog};
use crate::error::ApiError;
use crate::services::ActivityService;

/// GET /api/activity - Audit trail, newest first.
pub async fn list(
    Query(filter): Query<ActivityFilter>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ActivityLog>>, ApiError> {
    let activity = ActivityService::new().await?;
    let (data, total) = activity.list(&filter, &query).await?;
    Ok(Json(Page::new(data, &query, total)))
}
