use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::ServiceError;
use crate::api::pagination::ListQuery;
use crate::database::manager::DatabaseManager;
use crate::database::models::tag::Tag;
use crate::database::models::video::{
    CreateVideoRequest, UpdateVideoRequest, Video, VideoFilter, VideoImport,
};

pub struct VideoService {
    pool: PgPool,
}

impl VideoService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list(
        &self,
        query: &ListQuery,
        filter: &VideoFilter,
    ) -> Result<(Vec<Video>, i64), ServiceError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM videos");
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");
        builder.push(" LIMIT ").push_bind(query.limit());
        builder.push(" OFFSET ").push_bind(query.offset());

        let videos = builder
            .build_query_as::<Video>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM videos");
        push_filters(&mut count_builder, filter);
        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((videos, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Video>, ServiceError> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(video)
    }

    pub async fn get_by_youtube_id(&self, youtube_id: &str) -> Result<Option<Video>, ServiceError> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE youtube_id = $1")
            .bind(youtube_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(video)
    }

    pub async fn increment_views(&self, id: i32) -> Result<(), ServiceError> {
        sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn tags_for(&self, video_id: i32) -> Result<Vec<Tag>, ServiceError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tags t \
             JOIN video_tags vt ON vt.tag_id = t.id \
             WHERE vt.video_id = $1 ORDER BY t.name ASC",
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    pub async fn create(&self, req: &CreateVideoRequest) -> Result<Video, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos \
                (title, youtube_id, description, category_id, subcategory_id, \
                 duration, thumbnail_url, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.youtube_id)
        .bind(req.description.as_deref())
        .bind(req.category_id)
        .bind(req.subcategory_id)
        .bind(req.duration)
        .bind(req.thumbnail_url.as_deref())
        .bind(req.published_at)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tag_ids) = &req.tag_ids {
            replace_tags(&mut tx, video.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(video)
    }

    pub async fn update(&self, id: i32, req: &UpdateVideoRequest) -> Result<Video, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let video = sqlx::query_as::<_, Video>(
            "UPDATE videos SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                category_id = COALESCE($4, category_id), \
                subcategory_id = COALESCE($5, subcategory_id), \
                duration = COALESCE($6, duration), \
                thumbnail_url = COALESCE($7, thumbnail_url), \
                published_at = COALESCE($8, published_at), \
                updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(req.title.as_deref())
        .bind(req.description.as_deref())
        .bind(req.category_id)
        .bind(req.subcategory_id)
        .bind(req.duration)
        .bind(req.thumbnail_url.as_deref())
        .bind(req.published_at)
        .fetch_optional(&mut *tx)
        .await?;

        let video = video.ok_or_else(|| ServiceError::NotFound("Video not found".to_string()))?;

        if let Some(tag_ids) = &req.tag_ids {
            replace_tags(&mut tx, video.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(video)
    }

    /// Comments, ratings, and tag joins cascade with the row.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert-or-update keyed on the external video id; backs idempotent
    /// playlist re-imports. Fields the source did not provide keep any
    /// previously stored value.
    pub async fn upsert_by_youtube_id(&self, import: &VideoImport) -> Result<Video, ServiceError> {
        let video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos \
                (title, youtube_id, description, thumbnail_url, duration, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (youtube_id) DO UPDATE SET \
                title = EXCLUDED.title, \
                description = COALESCE(EXCLUDED.description, videos.description), \
                thumbnail_url = COALESCE(EXCLUDED.thumbnail_url, videos.thumbnail_url), \
                duration = COALESCE(EXCLUDED.duration, videos.duration), \
                published_at = COALESCE(EXCLUDED.published_at, videos.published_at), \
                updated_at = now() \
             RETURNING *",
        )
        .bind(&import.title)
        .bind(&import.youtube_id)
        .bind(import.description.as_deref())
        .bind(import.thumbnail_url.as_deref())
        .bind(import.duration)
        .bind(import.published_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(video)
    }
}

fn push_filters(builder: &mut QueryBuilder<Postgres>, filter: &VideoFilter) {
    let mut prefix = " WHERE ";
    if let Some(category_id) = filter.category_id {
        builder.push(prefix).push("category_id = ").push_bind(category_id);
        prefix = " AND ";
    }
    if let Some(subcategory_id) = filter.subcategory_id {
        builder
            .push(prefix)
            .push("subcategory_id = ")
            .push_bind(subcategory_id);
        prefix = " AND ";
    }
    if let Some(search) = &filter.search {
        let search = search.trim();
        if !search.is_empty() {
            builder
                .push(prefix)
                .push("title ILIKE ")
                .push_bind(format!("%{}%", search));
        }
    }
}

async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    video_id: i32,
    tag_ids: &[i32],
) -> Result<(), ServiceError> {
    sqlx::query("DELETE FROM video_tags WHERE video_id = $1")
        .bind(video_id)
        .execute(&mut **tx)
        .await?;

    for tag_id in tag_ids {
        sqlx::query(
            "INSERT INTO video_tags (video_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(video_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
