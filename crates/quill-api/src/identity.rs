//! Identity extractor — the boundary with the external identity provider.
//!
//! Authentication happens upstream; a trusted proxy forwards the
//! authenticated account as `x-user-id` (opaque UUID) and `x-user-name`
//! headers. Absent headers mean an anonymous request, which is not an error
//! — individual handlers decide whether to redirect to the login flow.

use axum::{extract::FromRequestParts, http::request::Parts};
use quill_core::policy::Actor;
use uuid::Uuid;

use crate::error::ApiError;

/// The forwarded account, when the request is authenticated.
#[derive(Debug, Clone)]
pub struct IdentityClaims {
  pub user_id:  Uuid,
  pub username: String,
}

/// Extracts to `Identity(None)` for anonymous requests; rejects only
/// malformed headers.
#[derive(Debug, Clone)]
pub struct Identity(pub Option<IdentityClaims>);

impl Identity {
  pub fn actor(&self) -> Actor {
    Actor { user_id: self.0.as_ref().map(|c| c.user_id) }
  }

  pub fn claims(&self) -> Option<&IdentityClaims> { self.0.as_ref() }
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Some(raw_id) = parts.headers.get("x-user-id") else {
      return Ok(Identity(None));
    };

    let user_id = raw_id
      .to_str()
      .ok()
      .and_then(|s| Uuid::parse_str(s).ok())
      .ok_or_else(|| {
        ApiError::BadRequest("malformed x-user-id header".into())
      })?;

    let username = parts
      .headers
      .get("x-user-name")
      .and_then(|v| v.to_str().ok())
      .filter(|s| !s.is_empty())
      .ok_or_else(|| {
        ApiError::BadRequest("x-user-name header required".into())
      })?
      .to_owned();

    Ok(Identity(Some(IdentityClaims { user_id, username })))
  }
}
