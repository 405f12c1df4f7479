//! Public listing of published blogs.

use crate::error::{AppError, ErrorBody};
use crate::publication::{PublicationFilter, PublishedBlog};
use crate::response::ok;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

/// GET /blog-alunos
#[utoipa::path(
    get,
    path = "/blog-alunos",
    tag = "Published",
    responses(
        (status = 200, description = "Published blogs", body = [PublishedBlog]),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn list_published(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let blogs = state.store.list_published(&PublicationFilter::default()).await?;
    Ok(ok(blogs))
}

/// GET /blog-alunos/busca?title=&content=
#[utoipa::path(
    get,
    path = "/blog-alunos/busca",
    tag = "Published",
    params(PublicationFilter),
    responses(
        (status = 200, description = "Published blogs matching the search", body = [PublishedBlog]),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn search_published(
    State(state): State<AppState>,
    Query(filter): Query<PublicationFilter>,
) -> Result<impl IntoResponse, AppError> {
    let blogs = state.store.list_published(&filter).await?;
    Ok(ok(blogs))
}
