//! The `ContentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `quill-store-sqlite`).
//! Higher layers (`quill-feed`, `quill-api`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  follow::Follow,
  group::{Group, NewGroup},
  post::{Comment, NewComment, NewPost, Post, PostUpdate},
  user::User,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Which posts a feed is composed from. Ordering is always the same:
/// `published_at` descending, insertion order breaking ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
  /// Every post.
  All,
  /// Posts filed under one group.
  Group(Uuid),
  /// Posts by one author.
  Author(Uuid),
  /// Posts by any of the listed authors; an empty list matches nothing.
  Authors(Vec<Uuid>),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Quill storage backend.
///
/// Referential-integrity rules every implementation must uphold:
/// deleting a group nulls its posts' group reference (the posts survive),
/// deleting a post deletes its comments, deleting a user deletes the user's
/// posts, comments, and every follow edge touching them. The follow pair is
/// unique, and inserting an existing pair must be race-safe get-or-create —
/// a uniqueness constraint plus conflict-tolerant insert, never
/// read-then-write.
///
/// Absence is expressed in return types (`Option`, `bool`), not errors; the
/// associated `Error` is for storage faults.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Mirror an externally-authenticated account into the registry.
  /// Idempotent: a second call with the same id updates the username.
  fn ensure_user<'a>(
    &'a self,
    user_id: Uuid,
    username: &'a str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  fn get_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user_by_name<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Delete an account. Cascades to the user's posts (and their comments),
  /// the user's comments elsewhere, and all follow edges in either
  /// direction. Returns `false` if the user was not registered.
  fn delete_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  /// Create a group. Returns `None` when the slug is already taken.
  fn add_group(
    &self,
    input: NewGroup,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + '_;

  fn get_group(
    &self,
    group_id: Uuid,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + '_;

  fn get_group_by_slug<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + 'a;

  fn list_groups(
    &self,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  /// Delete a group. Referencing posts survive with their group reference
  /// nulled. Returns `false` if no such group existed.
  fn delete_group(
    &self,
    group_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Persist a new post. The store assigns the id and `published_at`.
  fn add_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  fn get_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Replace a post's editable fields (text, group, image). Author and
  /// `published_at` are untouched. Returns `None` if the post is missing.
  ///
  /// Ownership is a policy concern — callers guard with
  /// [`crate::policy::check_edit`] first.
  fn update_post(
    &self,
    post_id: Uuid,
    update: PostUpdate,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Delete a post and, with it, all its comments.
  /// Returns `false` if no such post existed.
  fn delete_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Persist a comment. Returns `None` when the parent post does not exist.
  fn add_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// All comments on a post, oldest first.
  fn comments_for_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  // ── Follow edges ──────────────────────────────────────────────────────

  /// Get-or-create the (follower, followee) edge. Inserting an existing
  /// pair returns the edge unchanged; concurrent inserts of the same pair
  /// resolve to a single stored edge.
  ///
  /// Callers must not pass `follower_id == followee_id` — the self-follow
  /// rule is absorbed upstream (see `quill-feed`'s social graph), and the
  /// backend rejects such rows outright.
  fn insert_follow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> impl Future<Output = Result<Follow, Self::Error>> + Send + '_;

  /// Remove the edge. Returns `false` if it did not exist.
  fn remove_follow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn is_following(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Ids of everyone `follower_id` follows, for feed composition.
  fn following_ids(
    &self,
    follower_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  // ── Feed queries ──────────────────────────────────────────────────────

  /// One ordered slice of the posts matching `filter`.
  fn posts_page<'a>(
    &'a self,
    filter: &'a FeedFilter,
    limit: u32,
    offset: u64,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + 'a;

  /// Total posts matching `filter`.
  fn count_posts<'a>(
    &'a self,
    filter: &'a FeedFilter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
