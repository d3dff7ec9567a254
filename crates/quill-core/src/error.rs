//! Error types for `quill-core`.
//!
//! Only input validation lives here. Absence (unknown post, unknown slug) is
//! expressed as `Option`/`bool` in [`crate::store::ContentStore`] return
//! types, and storage faults belong to the backend's own error type.

use thiserror::Error;

use crate::group::MAX_TITLE_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("text must not be empty")]
  EmptyText,

  #[error("title is {len} characters; at most {MAX_TITLE_LEN} allowed")]
  TitleTooLong { len: usize },

  /// Slugs appear in URLs and must stay `[a-z0-9-]`.
  #[error("slug is not url-safe: {0:?}")]
  InvalidSlug(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
