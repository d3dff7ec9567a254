//! User — the local mirror of an externally-authenticated account.
//!
//! Credentials never enter this system. The identity provider hands each
//! request an opaque user id (and username); the store keeps this registry so
//! usernames resolve to authors and account deletion can cascade.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:  Uuid,
  pub username: String,
}
