use sqlx::PgPool;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::user::{UpdateUserRequest, User};

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<User>, i64), ServiceError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok((users, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>, ServiceError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Look up by username or email, for login.
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>, ServiceError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 OR email = $1")
                .bind(identifier)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    /// Insert a new user row. `password` must already be hashed.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, ServiceError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, is_admin) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Partial update; omitted fields keep their stored values. `password`
    /// must already be hashed when provided.
    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateUserRequest,
        password: Option<String>,
    ) -> Result<User, ServiceError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                password = COALESCE($3, password), \
                is_admin = COALESCE($4, is_admin), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(password.as_deref())
        .bind(changes.is_admin)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
