//! Administrative surface.

use axum::{extract::State, http::StatusCode};
use quill_core::store::ContentStore;

use crate::AppState;

/// `POST /admin/cache/clear` — force the landing page to recompute on the
/// next read.
pub async fn clear_cache<S>(State(state): State<AppState<S>>) -> StatusCode
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state.cache.invalidate();
  tracing::info!("landing-page cache cleared");
  StatusCode::NO_CONTENT
}
