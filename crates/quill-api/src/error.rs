//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Only genuine failures live here. The redirect-shaped outcomes (login
//! required, non-owner edit, self-follow) are successes as far as HTTP is
//! concerned and are built directly in the handlers.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// Invalid submission — the boundary equivalent of re-rendering the form
  /// with the message inline.
  #[error("invalid input: {0}")]
  Unprocessable(String),

  /// Slug already taken.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend fault.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// Translate a feed/social-graph error; absences become 404s.
  pub fn from_feed<E>(err: quill_feed::Error<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match err {
      quill_feed::Error::UnknownGroup(slug) => {
        Self::NotFound(format!("unknown group: {slug}"))
      }
      quill_feed::Error::UnknownAuthor(name) => {
        Self::NotFound(format!("unknown author: {name}"))
      }
      quill_feed::Error::NotFollowing => {
        Self::NotFound("no such follow".into())
      }
      quill_feed::Error::Store(e) => Self::store(e),
    }
  }
}

impl From<quill_core::Error> for ApiError {
  fn from(err: quill_core::Error) -> Self {
    Self::Unprocessable(err.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
      }
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
