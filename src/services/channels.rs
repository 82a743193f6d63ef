use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::channel::{UpdateChannelRequest, WatchedChannel};

pub struct ChannelService {
    pool: PgPool,
}

impl ChannelService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<WatchedChannel>, i64), ServiceError> {
        let channels = sqlx::query_as::<_, WatchedChannel>(
            "SELECT * FROM watched_channels ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM watched_channels")
            .fetch_one(&self.pool)
            .await?;

        Ok((channels, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<WatchedChannel>, ServiceError> {
        let channel =
            sqlx::query_as::<_, WatchedChannel>("SELECT * FROM watched_channels WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(channel)
    }

    pub async fn create(
        &self,
        channel_id: &str,
        title: Option<&str>,
        frequency: &str,
    ) -> Result<WatchedChannel, ServiceError> {
        let channel = sqlx::query_as::<_, WatchedChannel>(
            "INSERT INTO watched_channels (channel_id, title, frequency) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(channel_id)
        .bind(title)
        .bind(frequency)
        .fetch_one(&self.pool)
        .await?;
        Ok(channel)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateChannelRequest,
    ) -> Result<WatchedChannel, ServiceError> {
        let channel = sqlx::query_as::<_, WatchedChannel>(
            "UPDATE watched_channels SET \
                title = COALESCE($2, title), \
                frequency = COALESCE($3, frequency) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.frequency.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        channel.ok_or_else(|| ServiceError::NotFound("Channel not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM watched_channels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Channels whose re-import window has elapsed at `now`.
    pub async fn due_channels(&self, now: DateTime<Utc>) -> Result<Vec<WatchedChannel>, ServiceError> {
        let channels =
            sqlx::query_as::<_, WatchedChannel>("SELECT * FROM watched_channels ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(channels.into_iter().filter(|c| c.is_due(now)).collect())
    }

    pub async fn mark_checked(&self, id: i32, at: DateTime<Utc>) -> Result<(), ServiceError> {
        sqlx::query("UPDATE watched_channels SET last_check = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
