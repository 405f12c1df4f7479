//! Blog and status CRUD routes.

use crate::handlers::{create_blog, create_status, delete_blog, get_blog, list_blogs, list_statuses, update_blog};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/status", get(list_statuses).post(create_status))
        .with_state(state)
}

pub fn blog_routes(state: AppState) -> Router {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/:id", get(get_blog).put(update_blog).delete(delete_blog))
        .with_state(state)
}
