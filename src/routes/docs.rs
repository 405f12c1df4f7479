//! Serves the OpenAPI document and the Swagger UI that renders it.

use crate::error::{AppError, ErrorBody};
use crate::openapi::openapi_json;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Router};
use utoipa_swagger_ui::{Config, SwaggerUi};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Returns the API's OpenAPI spec as JSON.
#[utoipa::path(
    get,
    path = "/api-docs/openapi.json",
    tag = "OpenAPI",
    responses(
        (status = 200, description = "OpenAPI specification", body = String, content_type = "application/json"),
        (status = 500, description = "Internal error", body = ErrorBody),
    )
)]
pub async fn get_openapi_json() -> Response {
    match openapi_json() {
        Ok(spec) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], spec).into_response(),
        Err(e) => AppError::DataAccess(format!("failed to serialize OpenAPI spec: {}", e)).into_response(),
    }
}

/// GET /api-docs: interactive docs.
pub async fn api_docs() -> Redirect {
    Redirect::to("/swagger-ui/")
}

/// `/api-docs` redirects to the Swagger UI, which loads the document from [`OPENAPI_JSON_PATH`].
pub fn docs_routes() -> Router {
    Router::new()
        .route("/api-docs", get(api_docs))
        .route(OPENAPI_JSON_PATH, get(get_openapi_json))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).config(Config::new([OPENAPI_JSON_PATH])))
}
