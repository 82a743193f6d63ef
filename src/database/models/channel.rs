use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WatchedChannel {
    pub id: i32,
    pub channel_id: String,
    pub title: Option<String>,
    /// "daily" or "weekly"; enforced by a DB check constraint.
    pub frequency: String,
    pub last_check: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl WatchedChannel {
    /// Whether the channel is due for a re-import at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let window = match self.frequency.as_str() {
            "weekly" => Duration::days(7),
            _ => Duration::days(1),
        };
        match self.last_check {
            None => true,
            Some(checked) => now - checked >= window,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateChannelRequest {
    pub channel_id: String,
    pub title: Option<String>,
    pub frequency: String,
}

impl CreateChannelRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.channel_id.trim().is_empty() {
            field_errors.insert(
                "channel_id".to_string(),
                "A channel id is required".to_string(),
            );
        }
        validate_frequency(&self.frequency, &mut field_errors);

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid channel payload", Some(field_errors)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateChannelRequest {
    pub title: Option<String>,
    pub frequency: Option<String>,
}

impl UpdateChannelRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(frequency) = &self.frequency {
            validate_frequency(frequency, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid channel payload", Some(field_errors)))
        }
    }
}

fn validate_frequency(frequency: &str, field_errors: &mut HashMap<String, String>) {
    if frequency != "daily" && frequency != "weekly" {
        field_errors.insert(
            "frequency".to_string(),
            "Frequency must be 'daily' or 'weekly'".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(frequency: &str, last_check: Option<DateTime<Utc>>) -> WatchedChannel {
        WatchedChannel {
            id: 1,
            channel_id: "UCabc".to_string(),
            title: None,
            frequency: frequency.to_string(),
            last_check,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn never_checked_is_due() {
        assert!(channel("daily", None).is_due(Utc::now()));
    }

    #[test]
    fn daily_window() {
        let now = Utc::now();
        assert!(!channel("daily", Some(now - Duration::hours(2))).is_due(now));
        assert!(channel("daily", Some(now - Duration::hours(25))).is_due(now));
    }

    #[test]
    fn weekly_window() {
        let now = Utc::now();
        assert!(!channel("weekly", Some(now - Duration::days(3))).is_due(now));
        assert!(channel("weekly", Some(now - Duration::days(8))).is_due(now));
    }
}
