use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Bcrypt hash; never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_username(&self.username, &mut field_errors);
        validate_email(&self.email, &mut field_errors);
        validate_password(&self.password, &mut field_errors);

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid registration payload", Some(field_errors)))
        }
    }
}

/// Login accepts either key, matching what the public site sends.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// The identifier used for the user lookup.
    pub fn identifier(&self) -> Result<&str, ApiError> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("username or email is required"))
    }
}

/// Admin-created account; registration plus the admin flag.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_username(&self.username, &mut field_errors);
        validate_email(&self.email, &mut field_errors);
        validate_password(&self.password, &mut field_errors);

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid user payload", Some(field_errors)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(email) = &self.email {
            validate_email(email, &mut field_errors);
        }
        if let Some(password) = &self.password {
            validate_password(password, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid user payload", Some(field_errors)))
        }
    }
}

fn validate_username(username: &str, field_errors: &mut HashMap<String, String>) {
    if username.len() < 2 || username.len() > 50 {
        field_errors.insert(
            "username".to_string(),
            "Username must be between 2 and 50 characters".to_string(),
        );
    } else if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        field_errors.insert(
            "username".to_string(),
            "Username can only contain letters, numbers, hyphens, and underscores".to_string(),
        );
    }
}

fn validate_email(email: &str, field_errors: &mut HashMap<String, String>) {
    let looks_valid = email.len() <= 254
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        });
    if !looks_valid {
        field_errors.insert("email".to_string(), "Invalid email address".to_string());
    }
}

fn validate_password(password: &str, field_errors: &mut HashMap<String, String>) {
    if password.len() < 8 {
        field_errors.insert(
            "password".to_string(),
            "Password must be at least 8 characters".to_string(),
        );
    }
}
