//! Group — a topic posts can be filed under.
//!
//! Groups have an immutable identity: the slug is unique and appears in URLs.
//! Deleting a group never deletes its posts; their group reference is nulled
//! instead (enforced by the storage backend).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Upper bound on group titles.
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  pub group_id:    Uuid,
  pub title:       String,
  /// Unique, URL-safe identifier (`[a-z0-9-]`).
  pub slug:        String,
  pub description: String,
}

// ─── NewGroup ────────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::ContentStore::add_group`].
/// `group_id` is always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGroup {
  pub title:       String,
  pub slug:        String,
  pub description: String,
}

impl NewGroup {
  /// Validate the title bound and slug charset up front, so no invalid group
  /// ever reaches a storage backend.
  pub fn new(
    title: impl Into<String>,
    slug: impl Into<String>,
    description: impl Into<String>,
  ) -> Result<Self> {
    let title = title.into();
    let slug = slug.into();

    if title.chars().count() > MAX_TITLE_LEN {
      return Err(Error::TitleTooLong { len: title.chars().count() });
    }
    if slug.is_empty()
      || !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
      return Err(Error::InvalidSlug(slug));
    }

    Ok(Self { title, slug, description: description.into() })
  }
}
