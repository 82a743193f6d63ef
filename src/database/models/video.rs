use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::tag::Tag;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub youtube_id: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    /// Length in seconds, when known.
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detail payload for GET /api/videos/:id.
#[derive(Debug, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub tags: Vec<Tag>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub youtube_id: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tag_ids: Option<Vec<i32>>,
}

impl CreateVideoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        validate_title(&self.title, &mut field_errors);
        validate_youtube_id(&self.youtube_id, &mut field_errors);
        if let Some(duration) = self.duration {
            validate_duration(duration, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid video payload", Some(field_errors)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tag_ids: Option<Vec<i32>>,
}

impl UpdateVideoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(title) = &self.title {
            validate_title(title, &mut field_errors);
        }
        if let Some(duration) = self.duration {
            validate_duration(duration, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid video payload", Some(field_errors)))
        }
    }
}

/// Fields gathered from an external source for an idempotent upsert keyed
/// on `youtube_id`.
#[derive(Debug, Clone)]
pub struct VideoImport {
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
}

/// List filters accepted by GET /api/videos.
#[derive(Debug, Default, Deserialize)]
pub struct VideoFilter {
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}

fn validate_title(title: &str, field_errors: &mut HashMap<String, String>) {
    if title.trim().is_empty() || title.len() > 200 {
        field_errors.insert(
            "title".to_string(),
            "Title must be between 1 and 200 characters".to_string(),
        );
    }
}

fn validate_youtube_id(youtube_id: &str, field_errors: &mut HashMap<String, String>) {
    let ok = (6..=20).contains(&youtube_id.len())
        && youtube_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        field_errors.insert(
            "youtube_id".to_string(),
            "Invalid YouTube video id".to_string(),
        );
    }
}

fn validate_duration(duration: i32, field_errors: &mut HashMap<String, String>) {
    if duration < 0 {
        field_errors.insert(
            "duration".to_string(),
            "Duration cannot be negative".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, youtube_id: &str) -> CreateVideoRequest {
        CreateVideoRequest {
            title: title.to_string(),
            youtube_id: youtube_id.to_string(),
            description: None,
            category_id: None,
            subcategory_id: None,
            duration: None,
            thumbnail_url: None,
            published_at: None,
            tag_ids: None,
        }
    }

    #[test]
    fn accepts_standard_video_id() {
        assert!(request("Intro to Rust", "dQw4w9WgXcQ").validate().is_ok());
    }

    #[test]
    fn rejects_empty_title_and_bad_id() {
        let err = request("   ", "not valid!").validate().unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"]["title"].is_string());
        assert!(body["field_errors"]["youtube_id"].is_string());
    }
}
