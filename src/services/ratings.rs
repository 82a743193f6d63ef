use sqlx::PgPool;

use super::ServiceError;
use crate::database::manager::DatabaseManager;
use crate::database::models::rating::{Rating, RatingSummary};

pub struct RatingService {
    pool: PgPool,
}

impl RatingService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// One row per (video, user): a repeat submission replaces the score.
    pub async fn upsert(
        &self,
        video_id: i32,
        user_id: i32,
        score: i32,
    ) -> Result<Rating, ServiceError> {
        let rating = sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (video_id, user_id, score) VALUES ($1, $2, $3) \
             ON CONFLICT (video_id, user_id) DO UPDATE SET \
                score = EXCLUDED.score, \
                updated_at = now() \
             RETURNING *",
        )
        .bind(video_id)
        .bind(user_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;
        Ok(rating)
    }

    pub async fn for_user(
        &self,
        video_id: i32,
        user_id: i32,
    ) -> Result<Option<Rating>, ServiceError> {
        let rating = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE video_id = $1 AND user_id = $2",
        )
        .bind(video_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rating)
    }

    /// Mean score rounded to two decimals; None when the video has no ratings.
    pub async fn average_for_video(&self, video_id: i32) -> Result<Option<f64>, ServiceError> {
        let average: Option<f64> = sqlx::query_scalar(
            "SELECT ROUND(AVG(score)::numeric, 2)::float8 FROM ratings WHERE video_id = $1",
        )
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(average)
    }

    pub async fn count_for_video(&self, video_id: i32) -> Result<i64, ServiceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The caller's own rating next to the recomputed aggregate.
    pub async fn summary(&self, video_id: i32, user_id: i32) -> Result<RatingSummary, ServiceError> {
        let user_rating = self.for_user(video_id, user_id).await?.map(|r| r.score);
        let average_rating = self.average_for_video(video_id).await?;
        let rating_count = self.count_for_video(video_id).await?;

        Ok(RatingSummary {
            user_rating,
            average_rating,
            rating_count,
        })
    }
}
