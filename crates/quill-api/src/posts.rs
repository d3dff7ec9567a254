//! Handlers for the home feed and `/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Global feed; page 1 served through the cache |
//! | `POST` | `/posts` | Requires identity; 303 to the author's profile |
//! | `GET`  | `/posts/:id` | Post plus comments; 404 if unknown |
//! | `POST` | `/posts/:id/edit` | Author only; non-owners are redirected, not refused |
//! | `POST` | `/posts/:id/comment` | Requires identity; 303 back to the post |

use axum::{
  Json,
  extract::{Path, Query, State},
  response::{IntoResponse, Redirect, Response},
};
use quill_core::{
  page::Page,
  policy::{EditDecision, check_edit},
  post::{Comment, NewComment, NewPost, Post, PostUpdate},
  store::ContentStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState, LOGIN_PATH, error::ApiError, identity::Identity, post_path,
  profile_path,
};

#[derive(Debug, Deserialize)]
pub struct PageParams {
  pub page: Option<u32>,
}

/// Reject submissions that file a post under a group that does not exist.
async fn require_group<S>(
  state: &AppState<S>,
  group_id: Option<Uuid>,
) -> Result<(), ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(group_id) = group_id else { return Ok(()) };
  state
    .store
    .get_group(group_id)
    .await
    .map_err(ApiError::store)?
    .map(|_| ())
    .ok_or_else(|| ApiError::Unprocessable(format!("unknown group: {group_id}")))
}

// ─── Home feed ────────────────────────────────────────────────────────────────

/// `GET /[?page=N]`
pub async fn home<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<Post>>, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let page = state
    .composer
    .home_page(params.page.unwrap_or(1))
    .await
    .map_err(ApiError::from_feed)?;
  Ok(Json(page))
}

// ─── Detail ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PostDetail {
  pub post:     Post,
  pub comments: Vec<Comment>,
}

/// `GET /posts/:id`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post = state
    .store
    .get_post(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;

  let comments = state
    .store
    .comments_for_post(id)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(PostDetail { post, comments }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostBody {
  pub text:  String,
  pub group: Option<Uuid>,
  /// Blob-store key returned by the external media upload.
  pub image: Option<String>,
}

/// `POST /posts` — body: `{"text": "...", "group": null, "image": null}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Json(body): Json<PostBody>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(claims) = identity.claims() else {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  };

  let author = state
    .store
    .ensure_user(claims.user_id, &claims.username)
    .await
    .map_err(ApiError::store)?;

  require_group(&state, body.group).await?;
  let mut input = NewPost::new(author.user_id, body.text)?;
  input.group_id = body.group;
  input.image = body.image;

  let created = state.store.add_post(input).await.map_err(ApiError::store)?;
  tracing::info!(post_id = %created.post_id, author = %author.username, "post created");

  Ok(Redirect::to(&profile_path(&author.username)).into_response())
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `POST /posts/:id/edit`
///
/// The ownership guard runs before anything is validated or written. A
/// non-owner is sent to the post's read view with no error and no mutation;
/// this mirrors the product exactly.
pub async fn edit<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(id): Path<Uuid>,
  Json(body): Json<PostBody>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post = state
    .store
    .get_post(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;

  match check_edit(&identity.actor(), &post) {
    EditDecision::RedirectToLogin => {
      Ok(Redirect::to(LOGIN_PATH).into_response())
    }
    EditDecision::RedirectToPost(post_id) => {
      Ok(Redirect::to(&post_path(post_id)).into_response())
    }
    EditDecision::Allow(_) => {
      require_group(&state, body.group).await?;
      let mut update = PostUpdate::new(body.text)?;
      update.group_id = body.group;
      update.image = body.image;

      state
        .store
        .update_post(id, update)
        .await
        .map_err(ApiError::store)?;

      Ok(Redirect::to(&post_path(id)).into_response())
    }
  }
}

// ─── Comment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub text: String,
}

/// `POST /posts/:id/comment` — body: `{"text": "..."}`
pub async fn comment<S>(
  State(state): State<AppState<S>>,
  identity: Identity,
  Path(id): Path<Uuid>,
  Json(body): Json<CommentBody>,
) -> Result<Response, ApiError>
where
  S: ContentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(claims) = identity.claims() else {
    return Ok(Redirect::to(LOGIN_PATH).into_response());
  };

  let author = state
    .store
    .ensure_user(claims.user_id, &claims.username)
    .await
    .map_err(ApiError::store)?;

  let input = NewComment::new(id, author.user_id, body.text)?;
  state
    .store
    .add_comment(input)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;

  Ok(Redirect::to(&post_path(id)).into_response())
}
