//! Route groups and the assembled application router.

pub mod blog;
pub mod common;
pub mod docs;
pub mod publication;

pub use blog::{blog_routes, status_routes};
pub use common::common_routes;
pub use docs::docs_routes;
pub use publication::publication_routes;

use crate::config::DEFAULT_BODY_LIMIT;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full router with the default body limit.
pub fn app(state: AppState) -> Router {
    app_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

/// Full router: every route group plus request tracing and a body size cap.
pub fn app_with_body_limit(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(status_routes(state.clone()))
        .merge(blog_routes(state.clone()))
        .merge(publication_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
