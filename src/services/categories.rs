use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::category::{Category, UpdateCategoryRequest};

pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Category>, i64), ServiceError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY name ASC LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok((categories, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Category>, ServiceError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, ServiceError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        parent_id: Option<i32>,
    ) -> Result<Category, ServiceError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug, parent_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(slug)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    /// Partial update; zero matched rows is a not-found, never silent success.
    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateCategoryRequest,
    ) -> Result<Category, ServiceError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                parent_id = COALESCE($4, parent_id), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.slug.as_deref())
        .bind(changes.parent_id)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))
    }

    /// Delete unless videos, subcategories, or child categories still
    /// reference the row. Returns `false` when blocked by dependents.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        if self.dependent_count(id).await? > 0 {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Category not found".to_string()));
        }
        Ok(true)
    }

    pub async fn dependent_count(&self, id: i32) -> Result<i64, ServiceError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM videos WHERE category_id = $1) \
                  + (SELECT COUNT(*) FROM subcategories WHERE category_id = $1) \
                  + (SELECT COUNT(*) FROM categories WHERE parent_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn video_count(&self, id: i32) -> Result<i64, ServiceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE category_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
