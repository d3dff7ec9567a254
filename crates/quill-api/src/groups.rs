//! Handlers for `/group/:slug` and `/groups`.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use quill_core::{
  group::{Group, NewGroup},
  store::ContentStore,
};
use quill_feed::GroupFeed;
use serde::Deserialize;

use crate::{
  AppState, LOGIN_PATH, error::ApiError, identity::Identity,
  posts::PageParams,
};

/// `GET /group/:slug[?page=N]` — 404 when the slug is unknown.
pub async fn feed<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  Query(params): Query<PageParams>,
) -> Result<Json<GroupFeed>, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let feed = state
    .composer
    .group_feed(&slug, params.page.unwrap_or(1))
    .await
    .map_err(ApiError::from_feed)?;
  Ok(Json(feed))
}

/// `GET /groups` — every group, ordered by title.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Group>>, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let groups = state.store.list_groups().await.map_err(ApiError::store)?;
  Ok(Json(groups))
}

#[derive(Debug, Deserialize)]
pub struct GroupBody {
  pub title:       String,
  pub slug:        String,
  #[serde(default)]
  pub description: String,
}

/// `POST /groups` — body: `{"title": "...", "slug": "...", "description": ""}`
///
/// Administrative: role gating happens in the upstream identity layer, so
/// here any authenticated actor passes.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Json(body): Json<GroupBody>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if identity.claims().is_none() {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  }

  let input = NewGroup::new(body.title, body.slug, body.description)?;
  let group = state
    .store
    .add_group(input)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::Conflict("slug already taken".into()))?;

  tracing::info!(slug = %group.slug, "group created");
  Ok((StatusCode::CREATED, Json(group)).into_response())
}
