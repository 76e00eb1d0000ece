//! API error type and its HTTP mapping.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors surfaced by API handlers.
///
/// Every variant maps to a JSON body of the shape `{"error": "..."}` so
/// clients can treat failures uniformly.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error while serving request");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let body = Json(json!({ "error": self.to_string() }));
    (status, body).into_response()
  }
}
