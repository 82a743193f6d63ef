use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::config;

/// Per-user comment cooldown tracker.
///
/// Process-local: state lives in this process only and resets on restart,
/// so this is correct for single-instance deployments only. A multi-instance
/// deployment needs a shared store keyed by user id instead.
pub struct CommentThrottle {
    last_comment: Mutex<HashMap<i32, DateTime<Utc>>>,
}

impl CommentThrottle {
    pub fn global() -> &'static CommentThrottle {
        static INSTANCE: OnceLock<CommentThrottle> = OnceLock::new();
        INSTANCE.get_or_init(|| CommentThrottle {
            last_comment: Mutex::new(HashMap::new()),
        })
    }

    /// Err carries the remaining wait in whole seconds (at least 1).
    pub fn check(&self, user_id: i32) -> Result<(), i64> {
        let cooldown_secs = config::config().api.comment_cooldown_secs;
        self.check_at(user_id, Utc::now(), cooldown_secs)
    }

    fn check_at(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
        cooldown_secs: i64,
    ) -> Result<(), i64> {
        let map = self.last_comment.lock().unwrap();
        if let Some(last) = map.get(&user_id) {
            let cooldown = Duration::seconds(cooldown_secs);
            let elapsed = now - *last;
            if elapsed < cooldown {
                return Err((cooldown - elapsed).num_seconds().max(1));
            }
        }
        Ok(())
    }

    pub fn record(&self, user_id: i32) {
        self.record_at(user_id, Utc::now());
    }

    fn record_at(&self, user_id: i32, at: DateTime<Utc>) {
        self.last_comment.lock().unwrap().insert(user_id, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_comment_passes() {
        let throttle = CommentThrottle {
            last_comment: Mutex::new(HashMap::new()),
        };
        assert!(throttle.check_at(1, Utc::now(), 30).is_ok());
    }

    #[test]
    fn second_comment_inside_window_reports_wait() {
        let throttle = CommentThrottle {
            last_comment: Mutex::new(HashMap::new()),
        };
        let start = Utc::now();
        throttle.record_at(1, start);

        let wait = throttle
            .check_at(1, start + Duration::seconds(10), 30)
            .unwrap_err();
        assert!(wait > 0 && wait <= 20);

        // A different user is unaffected
        assert!(throttle.check_at(2, start + Duration::seconds(10), 30).is_ok());
    }

    #[test]
    fn comment_after_window_passes() {
        let throttle = CommentThrottle {
            last_comment: Mutex::new(HashMap::new()),
        };
        let start = Utc::now();
        throttle.record_at(1, start);
        assert!(throttle.check_at(1, start + Duration::seconds(31), 30).is_ok());
    }
}
