use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub video_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub video_id: i32,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_content(&self.content, &mut field_errors);
        if self.video_id <= 0 {
            field_errors.insert("video_id".to_string(), "A video is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid comment payload", Some(field_errors)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_content(&self.content, &mut field_errors);

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid comment payload", Some(field_errors)))
        }
    }
}

fn validate_content(content: &str, field_errors: &mut HashMap<String, String>) {
    if content.trim().is_empty() {
        field_errors.insert("content".to_string(), "Comment cannot be empty".to_string());
    } else if content.len() > 2000 {
        field_errors.insert(
            "content".to_string(),
            "Comment cannot exceed 2000 characters".to_string(),
        );
    }
}
