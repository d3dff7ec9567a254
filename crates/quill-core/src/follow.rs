//! Follow — a directed edge in the social graph.
//!
//! At most one edge exists per (follower, followee) pair, and no edge ever
//! points back at its own follower. Both rules are enforced by the storage
//! backend; the follower's posts feed is composed from these edges.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
  pub follower_id: Uuid,
  pub followee_id: Uuid,
}
