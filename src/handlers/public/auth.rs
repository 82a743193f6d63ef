use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::auth::{generate_jwt, password, Claims};
use crate::database::models::user::{LoginRequest, RegisterRequest};
use crate::api::extract::Payload;
use crate::error::ApiError;
use crate::services::activity::log_activity;
use crate::services::UserService;

/// POST /auth/register - Create an account and issue a session token.
/// A duplicate username or email surfaces as 409 from the unique constraint.
pub async fn register(
    Payload(payload): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    payload.validate()?;

    let hashed = password::hash(&payload.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process password")
    })?;

    let users = UserService::new().await?;
    let user = users
        .create(&payload.username, &payload.email, &hashed, false)
        .await?;

    let token = generate_jwt(Claims::new(user.id, user.username.clone(), user.is_admin))?;
    log_activity(Some(user.id), "register", "user", Some(user.id), None).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": user, "token": token })),
    ))
}

/// POST /auth/login - Verify credentials and issue a session token.
pub async fn login(Payload(payload): Payload<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let identifier = payload.identifier()?;

    let users = UserService::new().await?;
    let user = users
        .get_by_identifier(identifier)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = password::verify(&payload.password, &user.password).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("Failed to verify credentials")
    })?;
    if !valid {
        // Same message as the unknown-user case; no account probing
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(Claims::new(user.id, user.username.clone(), user.is_admin))?;
    log_activity(Some(user.id), "login", "user", Some(user.id), None).await;

    Ok(Json(json!({ "user": user, "token": token })))
}
