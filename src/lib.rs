//! Blog API: statuses, blog posts and the published-blog listing over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod publication;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DataSource, PgSettings, ServerConfig};
pub use error::{AppError, ConfigError};
pub use model::{Blog, BlogChanges, BlogWithStatus, NewBlog, NewStatus, Status};
pub use openapi::ApiDoc;
pub use publication::{PublicationFilter, PublishedBlog, PUBLISHED_STATUS_ID};
pub use routes::{app, app_with_body_limit};
pub use state::AppState;
pub use store::{connect, BlogStore, MemoryStore, PgStore};
