use axum::{extract::Query, http::StatusCode, response::Json, Extension};

use crate::api::pagination::{ListQuery, Page};
use crate::auth::password;
use crate::database::models::user::{CreateUserRequest, User};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::UserService;

/// GET /api/users - Admin-only listing.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Page<User>>, ApiError> {
    let users = UserService::new().await?;
    let (data, total) = users.list(&query).await?;
    Ok(Json(Page::new(data, &query, total)))
}

/// POST /api/users - Admin-created account, optionally with the admin flag.
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    payload.validate()?;

    let hashed = password::hash(&payload.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process password")
    })?;

    let users = UserService::new().await?;
    let user = users
        .create(&payload.username, &payload.email, &hashed, payload.is_admin)
        .await?;
    log_activity(
        Some(auth.user_id),
        "create",
        "user",
        Some(user.id),
        Some(user.username.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(user)))
}
