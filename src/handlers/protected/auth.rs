use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::database::models::user::User;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::activity::log_activity;
use crate::services::UserService;

/// GET /api/auth/me - Current user profile, password excluded by the model.
pub async fn me(Extension(auth): Extension<AuthUser>) -> Result<Json<User>, ApiError> {
    let users = UserService::new().await?;
    let user = users
        .get(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;
    Ok(Json(user))
}

/// POST /api/auth/logout - Tokens are stateless; the client discards its copy.
pub async fn logout(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    log_activity(Some(auth.user_id), "logout", "user", Some(auth.user_id), None).await;
    Ok(Json(json!({ "message": "Logout successful" })))
}
