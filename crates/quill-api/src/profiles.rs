//! Handlers for author profiles and the social graph.
//!
//! Follow and unfollow both land the actor back on the target's profile.
//! Following yourself is not an error — nothing is stored and the redirect
//! happens anyway.

use axum::{
  Json,
  extract::{Path, Query, State},
  response::{IntoResponse, Redirect, Response},
};
use quill_core::{
  page::Page,
  policy::require_authenticated,
  post::Post,
  store::ContentStore,
};
use quill_feed::AuthorFeed;
use uuid::Uuid;

use crate::{
  AppState, LOGIN_PATH, error::ApiError, identity::Identity,
  posts::PageParams, profile_path,
};

/// `GET /profile/:username[?page=N]` — 404 when the username is unknown.
pub async fn feed<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(username): Path<String>,
  Query(params): Query<PageParams>,
) -> Result<Json<AuthorFeed>, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = identity.actor().user_id;
  let feed = state
    .composer
    .author_feed(viewer, &username, params.page.unwrap_or(1))
    .await
    .map_err(ApiError::from_feed)?;
  Ok(Json(feed))
}

/// `GET /follow[?page=N]` — the personalised feed; anonymous actors are sent
/// to the login flow.
pub async fn following_feed<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Query(params): Query<PageParams>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Ok(viewer_id) = require_authenticated(&identity.actor()) else {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  };

  let page: Page<Post> = state
    .composer
    .following_feed(viewer_id, params.page.unwrap_or(1))
    .await
    .map_err(ApiError::from_feed)?;
  Ok(Json(page).into_response())
}

/// Resolve a profile path segment to the account's id, or 404.
async fn resolve_author<S>(
  state: &AppState<S>,
  username: &str,
) -> Result<Uuid, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_user_by_name(username)
    .await
    .map_err(ApiError::store)?
    .map(|author| author.user_id)
    .ok_or_else(|| ApiError::NotFound(format!("unknown author: {username}")))
}

/// `POST /profile/:username/follow`
pub async fn follow<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(username): Path<String>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(claims) = identity.claims() else {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  };

  let follower = state
    .store
    .ensure_user(claims.user_id, &claims.username)
    .await
    .map_err(ApiError::store)?;
  let author_id = resolve_author(&state, &username).await?;

  // Self-follow comes back as a no-op outcome; the redirect is the same.
  state
    .graph
    .follow(follower.user_id, author_id)
    .await
    .map_err(ApiError::from_feed)?;

  Ok(Redirect::to(&profile_path(&username)).into_response())
}

/// `POST /profile/:username/unfollow` — 404 when no edge exists.
pub async fn unfollow<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(username): Path<String>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Ok(follower_id) = require_authenticated(&identity.actor()) else {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  };

  let author_id = resolve_author(&state, &username).await?;
  state
    .graph
    .unfollow(follower_id, author_id)
    .await
    .map_err(ApiError::from_feed)?;

  Ok(Redirect::to(&profile_path(&username)).into_response())
}
