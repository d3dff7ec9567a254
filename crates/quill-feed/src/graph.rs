//! Follow and unfollow — the social-graph service.

use std::sync::Arc;

use quill_core::{follow::Follow, store::ContentStore};
use uuid::Uuid;

use crate::error::{Error, Result};

/// What a follow request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
  /// The edge exists — freshly created or already present (the operation is
  /// idempotent get-or-create).
  Followed(Follow),
  /// Follower and followee were the same account. Nothing was stored and no
  /// error is surfaced; the boundary just sends the actor back.
  SelfFollow,
}

pub struct SocialGraph<S> {
  store: Arc<S>,
}

impl<S> Clone for SocialGraph<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContentStore> SocialGraph<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Follow `followee_id`. Self-follow is absorbed here, before the store
  /// ever sees it.
  pub async fn follow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> Result<FollowOutcome, S::Error> {
    if follower_id == followee_id {
      return Ok(FollowOutcome::SelfFollow);
    }

    let edge = self
      .store
      .insert_follow(follower_id, followee_id)
      .await
      .map_err(Error::Store)?;
    tracing::debug!(%follower_id, %followee_id, "follow edge ensured");
    Ok(FollowOutcome::Followed(edge))
  }

  /// Remove the edge; [`Error::NotFollowing`] if there was none.
  pub async fn unfollow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> Result<(), S::Error> {
    let removed = self
      .store
      .remove_follow(follower_id, followee_id)
      .await
      .map_err(Error::Store)?;
    if !removed {
      return Err(Error::NotFollowing);
    }
    Ok(())
  }

  /// Whether `user_id` currently follows `author_id`; drives the
  /// follow/unfollow affordance on profiles.
  pub async fn is_following(
    &self,
    user_id: Uuid,
    author_id: Uuid,
  ) -> Result<bool, S::Error> {
    self
      .store
      .is_following(user_id, author_id)
      .await
      .map_err(Error::Store)
  }

  /// Everyone `user_id` follows, for composing their following feed.
  pub async fn following_ids(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<Uuid>, S::Error> {
    self.store.following_ids(user_id).await.map_err(Error::Store)
  }
}
