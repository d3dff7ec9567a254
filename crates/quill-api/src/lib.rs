//! JSON HTTP boundary for Quill.
//!
//! Exposes an axum [`Router`] backed by any [`quill_core::store::ContentStore`].
//! Credential authentication, TLS, and transport concerns are the caller's
//! responsibility; requests arrive with the identity headers described in
//! [`identity`].
//!
//! Outcome conventions, matching the product's behavior: mutations answer
//! with a `303 See Other` to the page the actor lands on next; anonymous
//! mutation attempts are redirected to [`LOGIN_PATH`]; a non-owner edit is
//! silently redirected to the post's read view with nothing mutated.

pub mod error;
pub mod identity;

mod admin;
mod groups;
mod posts;
mod profiles;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use quill_core::store::ContentStore;
use quill_feed::{FeedCache, FeedComposer, SocialGraph};
use serde::Deserialize;

pub use error::ApiError;

/// Where anonymous actors are sent to authenticate (external flow).
pub const LOGIN_PATH: &str = "/auth/login";

pub(crate) fn post_path(post_id: uuid::Uuid) -> String {
  format!("/posts/{post_id}")
}

pub(crate) fn profile_path(username: &str) -> String {
  format!("/profile/{username}")
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` merged with
/// `QUILL_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Seconds a rendered landing page is served before recomputation.
  #[serde(default = "default_cache_ttl_secs")]
  pub cache_ttl_secs: u64,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("quill.db") }
fn default_cache_ttl_secs() -> u64 { 20 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: ContentStore> {
  pub store:    Arc<S>,
  pub composer: FeedComposer<S>,
  pub graph:    SocialGraph<S>,
  pub cache:    Arc<FeedCache>,
}

impl<S: ContentStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      composer: self.composer.clone(),
      graph:    self.graph.clone(),
      cache:    Arc::clone(&self.cache),
    }
  }
}

impl<S: ContentStore> AppState<S> {
  /// Wire the services around one store and one injected cache.
  pub fn new(store: Arc<S>, cache: Arc<FeedCache>) -> Self {
    Self {
      composer: FeedComposer::new(Arc::clone(&store), Arc::clone(&cache)),
      graph: SocialGraph::new(Arc::clone(&store)),
      store,
      cache,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContentStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Feeds
    .route("/", get(posts::home::<S>))
    .route("/group/{slug}", get(groups::feed::<S>))
    .route("/profile/{username}", get(profiles::feed::<S>))
    .route("/follow", get(profiles::following_feed::<S>))
    // Posts and comments
    .route("/posts", post(posts::create::<S>))
    .route("/posts/{id}", get(posts::detail::<S>))
    .route("/posts/{id}/edit", post(posts::edit::<S>))
    .route("/posts/{id}/comment", post(posts::comment::<S>))
    // Social graph
    .route("/profile/{username}/follow", post(profiles::follow::<S>))
    .route("/profile/{username}/unfollow", post(profiles::unfollow::<S>))
    // Groups
    .route("/groups", get(groups::list::<S>).post(groups::create::<S>))
    // Administrative surface
    .route("/admin/cache/clear", post(admin::clear_cache::<S>))
    .with_state(state)
}
