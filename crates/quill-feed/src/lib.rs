//! Feed composition, the global-feed cache, and the social graph.
//!
//! Everything here is generic over a [`quill_core::store::ContentStore`];
//! the services own no entity data, only transient query results.

pub mod cache;
pub mod composer;
pub mod error;
pub mod graph;

pub use cache::FeedCache;
pub use composer::{AuthorFeed, FeedComposer, GroupFeed};
pub use error::Error;
pub use graph::{FollowOutcome, SocialGraph};
