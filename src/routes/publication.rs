//! Published-blog routes.

use crate::handlers::{list_published, search_published};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn publication_routes(state: AppState) -> Router {
    Router::new()
        .route("/blog-alunos", get(list_published))
        .route("/blog-alunos/busca", get(search_published))
        .with_state(state)
}
