//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Responses fall into three buckets: a plain-text 404 for absent items, a 400
//! when the store rejected a write, and a 500 for everything else.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Body of every 404 response.
pub const NOT_FOUND_MESSAGE: &str = "Item does not exist.";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("item does not exist")]
  NotFound,

  #[error(transparent)]
  Service(#[from] todo_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
      ApiError::Service(e) if e.is_conflict() => {
        tracing::warn!(error = %e, "write rejected by store");
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "message": "Database update failed.", "details": e.to_string() })),
        )
          .into_response()
      }
      ApiError::Service(e) => {
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": "An unexpected error occurred.", "details": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
