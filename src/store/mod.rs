//! Data access for statuses and blogs.
//!
//! Handlers only see [`BlogStore`]. The caller picks the implementation at startup through
//! [`DataSource`]: [`PgStore`] for PostgreSQL, [`MemoryStore`] for tests and local runs.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, synchronize};

use crate::config::DataSource;
use crate::error::AppError;
use crate::model::{Blog, BlogChanges, BlogWithStatus, NewBlog, NewStatus, Status};
use crate::publication::{PublicationFilter, PublishedBlog};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Round-trips to the backing store; used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_statuses(&self) -> Result<Vec<Status>, AppError>;

    async fn create_status(&self, status: &NewStatus) -> Result<Status, AppError>;

    async fn list_blogs(&self) -> Result<Vec<BlogWithStatus>, AppError>;

    /// Returns `None` when no row has this id.
    async fn get_blog(&self, id: i32) -> Result<Option<BlogWithStatus>, AppError>;

    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError>;

    /// Returns `None` when no row has this id.
    async fn update_blog(&self, id: i32, changes: &BlogChanges) -> Result<Option<Blog>, AppError>;

    /// Returns `false` when no row was deleted.
    async fn delete_blog(&self, id: i32) -> Result<bool, AppError>;

    /// Published posts (`statusId == 1`) matching `filter`, ordered by id.
    async fn list_published(&self, filter: &PublicationFilter) -> Result<Vec<PublishedBlog>, AppError>;
}

/// Builds the store described by `datasource`. For PostgreSQL this creates the database if
/// missing, opens the pool and synchronizes the schema.
pub async fn connect(datasource: &DataSource) -> Result<Arc<dyn BlogStore>, AppError> {
    match datasource {
        DataSource::Postgres(settings) => {
            ensure_database_exists(&settings.url).await?;
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.url)
                .await?;
            synchronize(&pool, &settings.schema).await?;
            tracing::info!(schema = %settings.schema, "database connected");
            Ok(Arc::new(PgStore::new(pool, settings.schema.clone())))
        }
        DataSource::Memory => {
            tracing::info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
