use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::subcategory::{Subcategory, UpdateSubcategoryRequest};

pub struct SubcategoryService {
    pool: PgPool,
}

impl SubcategoryService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// List, optionally restricted to one parent category.
    pub async fn list(
        &self,
        query: &ListQuery,
        category_id: Option<i32>,
    ) -> Result<(Vec<Subcategory>, i64), ServiceError> {
        let subcategories = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, Subcategory>(
                    "SELECT * FROM subcategories WHERE category_id = $1 \
                     ORDER BY name ASC LIMIT $2 OFFSET $3",
                )
                .bind(category_id)
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Subcategory>(
                    "SELECT * FROM subcategories ORDER BY name ASC LIMIT $1 OFFSET $2",
                )
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await?
            }
        };

        let total: i64 = match category_id {
            Some(category_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM subcategories WHERE category_id = $1")
                    .bind(category_id)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM subcategories")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok((subcategories, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Subcategory>, ServiceError> {
        let subcategory =
            sqlx::query_as::<_, Subcategory>("SELECT * FROM subcategories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(subcategory)
    }

    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        category_id: i32,
    ) -> Result<Subcategory, ServiceError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(
            "INSERT INTO subcategories (name, slug, category_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(slug)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(subcategory)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateSubcategoryRequest,
    ) -> Result<Subcategory, ServiceError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(
            "UPDATE subcategories SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                category_id = COALESCE($4, category_id), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.slug.as_deref())
        .bind(changes.category_id)
        .fetch_optional(&self.pool)
        .await?;

        subcategory.ok_or_else(|| ServiceError::NotFound("Subcategory not found".to_string()))
    }

    /// Delete unless videos still reference the row. Returns `false` when
    /// blocked by dependents.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        if self.video_count(id).await? > 0 {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Subcategory not found".to_string()));
        }
        Ok(true)
    }

    pub async fn video_count(&self, id: i32) -> Result<i64, ServiceError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE subcategory_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
