use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::warn;

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::activity::{ActivityFilter, ActivityLog};

pub struct ActivityService {
    pool: PgPool,
}

impl ActivityService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn record(
        &self,
        user_id: Option<i32>,
        action: &str,
        entity_type: &str,
        entity_id: Option<i32>,
        details: Option<&str>,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO activity_logs (user_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list(
        &self,
        filter: &ActivityFilter,
        query: &ListQuery,
    ) -> Result<(Vec<ActivityLog>, i64), ServiceError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM activity_logs");
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");
        builder.push(" LIMIT ").push_bind(query.limit());
        builder.push(" OFFSET ").push_bind(query.offset());

        let logs = builder
            .build_query_as::<ActivityLog>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM activity_logs");
        push_filters(&mut count_builder, filter);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((logs, total))
    }
}

fn push_filters(builder: &mut QueryBuilder<Postgres>, filter: &ActivityFilter) {
    let mut prefix = " WHERE ";
    if let Some(entity_type) = &filter.entity_type {
        builder
            .push(prefix)
            .push("entity_type = ")
            .push_bind(entity_type.clone());
        prefix = " AND ";
    }
    if let Some(user_id) = filter.user_id {
        builder.push(prefix).push("user_id = ").push_bind(user_id);
    }
}

/// Best-effort audit write used by mutation handlers: a failed write is
/// logged and never alters the caller's response.
pub async fn log_activity(
    user_id: Option<i32>,
    action: &str,
    entity_type: &str,
    entity_id: Option<i32>,
    details: Option<String>,
) {
    let result = async {
        let service = ActivityService::new().await?;
        service
            .record(user_id, action, entity_type, entity_id, details.as_deref())
            .await
    }
    .await;

    if let Err(e) = result {
        warn!("activity log write failed: {}", e);
    }
}
