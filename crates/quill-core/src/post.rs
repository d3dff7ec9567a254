//! Post and Comment — the content entities.
//!
//! A post's author and publication timestamp are set once and never change;
//! its text, group, and image are editable by the author only (enforced by
//! [`crate::policy`]). Comments are immutable once created and live and die
//! with their post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub post_id:      Uuid,
  /// Set at creation; no operation reassigns a post to another author.
  pub author_id:    Uuid,
  pub text:         String,
  /// `None` for ungrouped posts, and after the referenced group is deleted.
  pub group_id:     Option<Uuid>,
  /// Opaque blob-store key; the core never interprets it.
  pub image:        Option<String>,
  /// Store-assigned timestamp; feeds order by it, newest first.
  pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id:   Uuid,
  pub post_id:      Uuid,
  pub author_id:    Uuid,
  pub text:         String,
  pub published_at: DateTime<Utc>,
}

// ─── Validated inputs ────────────────────────────────────────────────────────

fn require_text(text: String) -> Result<String> {
  if text.trim().is_empty() {
    return Err(Error::EmptyText);
  }
  Ok(text)
}

/// Input to [`crate::store::ContentStore::add_post`].
/// `post_id` and `published_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
  pub author_id: Uuid,
  pub text:      String,
  pub group_id:  Option<Uuid>,
  pub image:     Option<String>,
}

impl NewPost {
  /// Rejects empty (or whitespace-only) text. Group and image default to
  /// absent; set the public fields to attach them.
  pub fn new(author_id: Uuid, text: impl Into<String>) -> Result<Self> {
    Ok(Self {
      author_id,
      text: require_text(text.into())?,
      group_id: None,
      image: None,
    })
  }
}

/// Replacement values for an edit — the editable fields, nothing else.
/// Author and `published_at` are not representable here by construction.
#[derive(Debug, Clone)]
pub struct PostUpdate {
  pub text:     String,
  pub group_id: Option<Uuid>,
  pub image:    Option<String>,
}

impl PostUpdate {
  pub fn new(text: impl Into<String>) -> Result<Self> {
    Ok(Self { text: require_text(text.into())?, group_id: None, image: None })
  }
}

/// Input to [`crate::store::ContentStore::add_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_id:   Uuid,
  pub author_id: Uuid,
  pub text:      String,
}

impl NewComment {
  pub fn new(
    post_id: Uuid,
    author_id: Uuid,
    text: impl Into<String>,
  ) -> Result<Self> {
    Ok(Self { post_id, author_id, text: require_text(text.into())? })
  }
}
