//! Status handlers: list and create. There is no delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::model::{NewStatus, Status};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// GET /status
#[utoipa::path(
    get,
    path = "/status",
    tag = "Status",
    responses(
        (status = 200, description = "All statuses", body = [Status]),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn list_statuses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.store.list_statuses().await?))
}

/// POST /status: `is_active` defaults to true.
#[utoipa::path(
    post,
    path = "/status",
    tag = "Status",
    request_body = NewStatus,
    responses(
        (status = 201, description = "Status created", body = Status),
        (status = 500, description = "Data access failure", body = ErrorBody),
    )
)]
pub async fn create_status(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewStatus>,
) -> Result<impl IntoResponse, AppError> {
    let status = state.store.create_status(&body).await?;
    Ok(created(status))
}
