//! Response helpers shared by the handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// `{"message": ...}` body used by the root and delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Blog deleted")]
    pub message: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: &str) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody {
        message: text.to_string(),
    })
}
