//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("unknown datasource '{0}' (expected 'postgres' or 'memory')")]
    UnknownDataSource(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    /// Raw driver error; its text is exposed to the caller unchanged.
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    /// Fault that did not come from sqlx: a constraint violation in the memory store,
    /// an id the integer column cannot hold, or a body that does not decode.
    #[error("{0}")]
    DataAccess(String),
}

impl AppError {
    pub fn blog_not_found() -> Self {
        AppError::NotFound("Blog not found".into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Db(_) | AppError::DataAccess(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::DataAccess(rejection.body_text())
    }
}

/// Error payload returned by every failing endpoint.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Blog not found")]
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
