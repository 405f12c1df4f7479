//! Blog CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::model::{Blog, BlogChanges, BlogWithStatus, NewBlog};
use crate::response::{created, message, ok, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::num::IntErrorKind;

/// Path id as the `integer` column sees it: an integer out of range names no row,
/// anything else that is not an integer fails as the database would.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.trim().parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AppError::blog_not_found(),
        _ => AppError::DataAccess(format!("invalid input syntax for type integer: \"{}\"", id_str)),
    })
}

/// GET /blogs: every blog with its status.
#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blogs",
    responses(
        (status = 200, description = "All blogs", body = [BlogWithStatus]),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn list_blogs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let blogs = state.store.list_blogs().await?;
    Ok(ok(blogs))
}

/// GET /blogs/:id
#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "Blogs",
    params(("id" = i32, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog found", body = BlogWithStatus),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let blog = state
        .store
        .get_blog(id)
        .await?
        .ok_or_else(AppError::blog_not_found)?;
    Ok(ok(blog))
}

/// POST /blogs: `statusId` is not checked here; the store's foreign key decides.
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "Blogs",
    request_body = NewBlog,
    responses(
        (status = 201, description = "Blog created", body = Blog),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn create_blog(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewBlog>,
) -> Result<impl IntoResponse, AppError> {
    let blog = state.store.create_blog(&body).await?;
    tracing::debug!(id = blog.id, "blog created");
    Ok(created(blog))
}

/// PUT /blogs/:id: partial update; absent or null fields keep their value.
#[utoipa::path(
    put,
    path = "/blogs/{id}",
    tag = "Blogs",
    params(("id" = i32, Path, description = "Blog id")),
    request_body = BlogChanges,
    responses(
        (status = 200, description = "Blog updated", body = Blog),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<BlogChanges>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let blog = state
        .store
        .update_blog(id, &body)
        .await?
        .ok_or_else(AppError::blog_not_found)?;
    Ok(ok(blog))
}

/// DELETE /blogs/:id
#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "Blogs",
    params(("id" = i32, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete_blog(id).await? {
        return Err(AppError::blog_not_found());
    }
    Ok(message("Blog deleted"))
}
