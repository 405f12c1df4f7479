//! PostgreSQL store: executes the generated SQL against a `PgPool`.

use super::BlogStore;
use crate::error::AppError;
use crate::model::{Blog, BlogChanges, BlogWithStatus, NewBlog, NewStatus, Status};
use crate::publication::{PublicationFilter, PublishedBlog};
use crate::sql::{
    bind_all, bind_all_as, delete_blog, insert_blog, insert_status, select_blogs_with_status,
    select_published, select_statuses, update_blog, QueryBuf,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// Wraps an open pool; tables are expected in `schema` (see [`super::synchronize`]).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<O>(&self, q: &QueryBuf) -> Result<Vec<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<O>(&self, q: &QueryBuf) -> Result<Option<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_one<O>(&self, q: &QueryBuf) -> Result<O, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all_as(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Blog row with the LEFT JOINed status columns (`status_*`, all nullable).
#[derive(FromRow)]
struct BlogStatusRow {
    #[sqlx(flatten)]
    blog: Blog,
    status_id: Option<i32>,
    status_label: Option<String>,
    status_order: Option<i32>,
    status_is_active: Option<bool>,
}

impl From<BlogStatusRow> for BlogWithStatus {
    fn from(row: BlogStatusRow) -> Self {
        let status = match (row.status_id, row.status_label, row.status_order, row.status_is_active) {
            (Some(id), Some(label), Some(order), Some(is_active)) => Some(Status {
                id,
                label,
                order,
                is_active,
            }),
            _ => None,
        };
        BlogWithStatus { blog: row.blog, status }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_statuses(&self) -> Result<Vec<Status>, AppError> {
        self.fetch_all(&select_statuses(&self.schema)).await
    }

    async fn create_status(&self, status: &NewStatus) -> Result<Status, AppError> {
        self.fetch_one(&insert_status(&self.schema, status)).await
    }

    async fn list_blogs(&self) -> Result<Vec<BlogWithStatus>, AppError> {
        let rows: Vec<BlogStatusRow> = self.fetch_all(&select_blogs_with_status(&self.schema, None)).await?;
        Ok(rows.into_iter().map(BlogWithStatus::from).collect())
    }

    async fn get_blog(&self, id: i32) -> Result<Option<BlogWithStatus>, AppError> {
        let row: Option<BlogStatusRow> = self
            .fetch_optional(&select_blogs_with_status(&self.schema, Some(id)))
            .await?;
        Ok(row.map(BlogWithStatus::from))
    }

    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError> {
        self.fetch_one(&insert_blog(&self.schema, blog)).await
    }

    async fn update_blog(&self, id: i32, changes: &BlogChanges) -> Result<Option<Blog>, AppError> {
        self.fetch_optional(&update_blog(&self.schema, id, changes)).await
    }

    async fn delete_blog(&self, id: i32) -> Result<bool, AppError> {
        let affected = self.execute(&delete_blog(&self.schema, id)).await?;
        Ok(affected > 0)
    }

    async fn list_published(&self, filter: &PublicationFilter) -> Result<Vec<PublishedBlog>, AppError> {
        self.fetch_all(&select_published(&self.schema, filter)).await
    }
}
