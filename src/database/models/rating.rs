use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i32,
    pub video_id: i32,
    pub user_id: i32,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RateVideoRequest {
    pub video_id: i32,
    pub score: i32,
}

impl RateVideoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if !(1..=5).contains(&self.score) {
            field_errors.insert(
                "score".to_string(),
                "Score must be between 1 and 5".to_string(),
            );
        }
        if self.video_id <= 0 {
            field_errors.insert("video_id".to_string(), "A video is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid rating payload", Some(field_errors)))
        }
    }
}

/// Response for rating reads and writes: the caller's own rating next to the
/// recomputed aggregate.
#[derive(Debug, Serialize)]
pub struct RatingSummary {
    pub user_rating: Option<i32>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds() {
        for score in 1..=5 {
            assert!(RateVideoRequest { video_id: 1, score }.validate().is_ok());
        }
        assert!(RateVideoRequest { video_id: 1, score: 0 }.validate().is_err());
        assert!(RateVideoRequest { video_id: 1, score: 6 }.validate().is_err());
    }
}
