//! Common routes: root banner, health, readiness, version.

use crate::response::{message, MessageBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthBody {
    status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyBody {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<String>,
}

/// GET /: liveness banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "Common",
    responses((status = 200, description = "API is running", body = MessageBody))
)]
pub async fn root() -> impl IntoResponse {
    message("API is running!")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Common",
    responses((status = 200, description = "Process is up", body = HealthBody))
)]
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok".into() })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "Common",
    responses(
        (status = 200, description = "Store reachable", body = ReadyBody),
        (status = 503, description = "Store unavailable", body = ReadyBody),
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded".into(),
                database: Some("unavailable".into()),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok".into(),
        database: Some("ok".into()),
    }))
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "Common",
    responses((status = 200, description = "Package name and version"))
)]
pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
