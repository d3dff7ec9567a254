//! Access-control policy — stateless guard functions.
//!
//! Handlers call these explicitly at the top of each mutating operation; there
//! is no implicit wrapping. Each guard returns a tagged decision the boundary
//! can translate directly into a response.
//!
//! One deliberate quirk, preserved from the product: an edit attempted by a
//! non-owner is not an error. The actor is silently sent to the post's
//! read-only view, and nothing is mutated.

use thiserror::Error;
use uuid::Uuid;

use crate::post::Post;

/// The requesting principal, as reported by the external identity provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
  pub user_id: Option<Uuid>,
}

impl Actor {
  pub fn anonymous() -> Self { Self { user_id: None } }

  pub fn user(user_id: Uuid) -> Self { Self { user_id: Some(user_id) } }

  pub fn is_authenticated(&self) -> bool { self.user_id.is_some() }
}

/// A mutating operation was attempted without an authenticated actor.
/// The boundary answers with a redirect to the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authentication required")]
pub struct AuthRequired;

/// Admit authenticated actors, yielding their id.
pub fn require_authenticated(actor: &Actor) -> Result<Uuid, AuthRequired> {
  actor.user_id.ok_or(AuthRequired)
}

/// True iff `actor_id` authored `post`. Authorship is the only edit right;
/// there are no moderator overrides.
pub fn can_edit_post(actor_id: Uuid, post: &Post) -> bool {
  actor_id == post.author_id
}

/// Outcome of an edit attempt, decided before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
  /// The actor owns the post; proceed with the edit.
  Allow(Uuid),
  RedirectToLogin,
  /// Authenticated but not the author: send to the read view, surface no
  /// error, mutate nothing.
  RedirectToPost(Uuid),
}

pub fn check_edit(actor: &Actor, post: &Post) -> EditDecision {
  match actor.user_id {
    None => EditDecision::RedirectToLogin,
    Some(id) if can_edit_post(id, post) => EditDecision::Allow(id),
    Some(_) => EditDecision::RedirectToPost(post.post_id),
  }
}
