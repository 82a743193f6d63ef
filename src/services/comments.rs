use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::comment::Comment;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list_for_video(
        &self,
        video_id: i32,
        query: &ListQuery,
    ) -> Result<(Vec<Comment>, i64), ServiceError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE video_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(video_id)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((comments, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Comment>, ServiceError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    pub async fn create(
        &self,
        video_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<Comment, ServiceError> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (video_id, user_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(video_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn update(&self, id: i32, content: &str) -> Result<Comment, ServiceError> {
        let comment = sqlx::query_as::<_, Comment>(
            "UPDATE comments SET content = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        comment.ok_or_else(|| ServiceError::NotFound("Comment not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
