//! Pagination types shared by every feed.
//!
//! Page size is a product constant, not a caller knob: all feeds show ten
//! posts per page. Pages are numbered from 1; a page past the end of the data
//! is an empty page, never an error.

use serde::{Deserialize, Serialize};

/// Posts per feed page, across all feed types.
pub const POSTS_PER_PAGE: u32 = 10;

/// One slice of an ordered feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  /// 1-based page number as requested (after clamping 0 up to 1).
  pub number: u32,
  /// Total items matching the feed's filter, across all pages.
  pub total:  u64,
  pub items:  Vec<T>,
}

impl<T> Page<T> {
  pub fn empty(number: u32) -> Self {
    Self { number, total: 0, items: Vec::new() }
  }

  pub fn total_pages(&self) -> u64 {
    self.total.div_ceil(POSTS_PER_PAGE as u64)
  }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Clamp a requested page number to 1-based and return the slice offset.
pub fn page_offset(page: u32) -> (u32, u64) {
  let page = page.max(1);
  (page, (page as u64 - 1) * POSTS_PER_PAGE as u64)
}
