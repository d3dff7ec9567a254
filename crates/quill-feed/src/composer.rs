//! Ordered, paginated views over posts.
//!
//! Four feeds, one ordering: `published_at` descending, ten posts per page.
//! Page numbers past the end of the data yield an empty page, never an
//! error. The landing page (global feed, page 1) is served through the
//! injected [`FeedCache`]; every other read goes straight to the store.

use std::sync::Arc;

use quill_core::{
  group::Group,
  page::{POSTS_PER_PAGE, Page, page_offset},
  post::Post,
  store::{ContentStore, FeedFilter},
  user::User,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  cache::FeedCache,
  error::{Error, Result},
};

/// A group's feed page together with the group itself.
#[derive(Debug, Clone, Serialize)]
pub struct GroupFeed {
  pub group: Group,
  pub page:  Page<Post>,
}

/// An author's feed page plus the profile context rendered next to it.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorFeed {
  pub author:         User,
  /// Total posts by this author, across all pages.
  pub post_count:     u64,
  /// Whether the viewing actor follows this author; always false for
  /// anonymous viewers.
  pub viewer_follows: bool,
  pub page:           Page<Post>,
}

pub struct FeedComposer<S> {
  store: Arc<S>,
  cache: Arc<FeedCache>,
}

impl<S> Clone for FeedComposer<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), cache: Arc::clone(&self.cache) }
  }
}

impl<S: ContentStore> FeedComposer<S> {
  pub fn new(store: Arc<S>, cache: Arc<FeedCache>) -> Self {
    Self { store, cache }
  }

  /// One page of the posts matching `filter`.
  async fn feed(
    &self,
    filter: &FeedFilter,
    page: u32,
  ) -> Result<Page<Post>, S::Error> {
    let (number, offset) = page_offset(page);
    let total =
      self.store.count_posts(filter).await.map_err(Error::Store)?;
    let items = self
      .store
      .posts_page(filter, POSTS_PER_PAGE, offset)
      .await
      .map_err(Error::Store)?;
    Ok(Page { number, total, items })
  }

  /// All posts, newest first.
  pub async fn global_feed(&self, page: u32) -> Result<Page<Post>, S::Error> {
    self.feed(&FeedFilter::All, page).await
  }

  /// The landing-page read path: page 1 through the cache, other pages
  /// bypass it.
  pub async fn home_page(&self, page: u32) -> Result<Page<Post>, S::Error> {
    let (number, _) = page_offset(page);
    if number != 1 {
      return self.global_feed(number).await;
    }

    if let Some(hit) = self.cache.lookup() {
      return Ok(hit);
    }

    let fresh = self.global_feed(1).await?;
    self.cache.store(fresh.clone());
    Ok(fresh)
  }

  /// Posts filed under the group with `slug`.
  pub async fn group_feed(
    &self,
    slug: &str,
    page: u32,
  ) -> Result<GroupFeed, S::Error> {
    let group = self
      .store
      .get_group_by_slug(slug)
      .await
      .map_err(Error::Store)?
      .ok_or_else(|| Error::UnknownGroup(slug.to_owned()))?;

    let page = self.feed(&FeedFilter::Group(group.group_id), page).await?;
    Ok(GroupFeed { group, page })
  }

  /// Posts by `username`, with the profile context (post count, whether the
  /// viewer follows the author).
  pub async fn author_feed(
    &self,
    viewer: Option<Uuid>,
    username: &str,
    page: u32,
  ) -> Result<AuthorFeed, S::Error> {
    let author = self
      .store
      .get_user_by_name(username)
      .await
      .map_err(Error::Store)?
      .ok_or_else(|| Error::UnknownAuthor(username.to_owned()))?;

    let page = self.feed(&FeedFilter::Author(author.user_id), page).await?;

    let viewer_follows = match viewer {
      Some(viewer_id) => self
        .store
        .is_following(viewer_id, author.user_id)
        .await
        .map_err(Error::Store)?,
      None => false,
    };

    Ok(AuthorFeed {
      post_count: page.total,
      author,
      viewer_follows,
      page,
    })
  }

  /// Posts by everyone `viewer_id` follows. An empty follow set is an empty
  /// page, not an error.
  pub async fn following_feed(
    &self,
    viewer_id: Uuid,
    page: u32,
  ) -> Result<Page<Post>, S::Error> {
    let authors = self
      .store
      .following_ids(viewer_id)
      .await
      .map_err(Error::Store)?;
    self.feed(&FeedFilter::Authors(authors), page).await
  }
}
