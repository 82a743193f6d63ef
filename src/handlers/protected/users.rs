use axum::{extract::Path, http::StatusCode, response::Json, Extension};

use crate::auth::password;
use crate::database::models::user::{UpdateUserRequest, User};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::UserService;

/// GET /api/users/:id - Owner or admin only.
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    if !auth.can_manage(id) {
        return Err(ApiError::forbidden("You can only view your own account"));
    }

    let users = UserService::new().await?;
    let user = users
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}

/// PUT /api/users/:id - Owner or admin; the admin flag is admin-only.
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Payload(payload): Payload<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    payload.validate()?;

    if !auth.can_manage(id) {
        return Err(ApiError::forbidden("You can only update your own account"));
    }
    if payload.is_admin.is_some() && !auth.admin {
        return Err(ApiError::forbidden("Only administrators can change roles"));
    }

    let hashed = match &payload.password {
        Some(plain) => Some(password::hash(plain).map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to process password")
        })?),
        None => None,
    };

    let users = UserService::new().await?;
    let user = users.update(id, &payload, hashed).await?;
    log_activity(Some(auth.user_id), "update", "user", Some(id), None).await;

    Ok(Json(user))
}

/// DELETE /api/users/:id - Owner or admin only.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if !auth.can_manage(id) {
        return Err(ApiError::forbidden("You can only delete your own account"));
    }

    let users = UserService::new().await?;
    if !users.delete(id).await? {
        return Err(ApiError::not_found("User not found"));
    }
    log_activity(Some(auth.user_id), "delete", "user", Some(id), None).await;

    Ok(StatusCode::NO_CONTENT)
}
