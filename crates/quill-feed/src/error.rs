//! Error type shared by the feed and social-graph services.

use thiserror::Error;

/// `E` is the storage backend's own error type.
#[derive(Debug, Error)]
pub enum Error<E: std::error::Error> {
  #[error("unknown group slug: {0:?}")]
  UnknownGroup(String),

  #[error("unknown author: {0:?}")]
  UnknownAuthor(String),

  /// Unfollow of an edge that does not exist.
  #[error("no follow edge to remove")]
  NotFollowing,

  #[error("store error: {0}")]
  Store(#[source] E),
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
