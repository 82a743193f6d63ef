use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::tag::{Tag, UpdateTagRequest};

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Tag>, i64), ServiceError> {
        let tags =
            sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC LIMIT $1 OFFSET $2")
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok((tags, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Tag>, ServiceError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tag)
    }

    pub async fn create(&self, name: &str, slug: &str) -> Result<Tag, ServiceError> {
        let tag =
            sqlx::query_as::<_, Tag>("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING *")
                .bind(name)
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(tag)
    }

    pub async fn update(&self, id: i32, changes: &UpdateTagRequest) -> Result<Tag, ServiceError> {
        let tag = sqlx::query_as::<_, Tag>(
            "UPDATE tags SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.slug.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        tag.ok_or_else(|| ServiceError::NotFound("Tag not found".to_string()))
    }

    /// Join rows in video_tags cascade, so a tag is always deletable.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
