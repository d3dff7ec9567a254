//! Time-boxed cache for the global feed's landing page.
//!
//! Render-once, serve-stale: the entry is never invalidated when posts are
//! created or deleted — it only ages out. Readers may miss a very recent
//! post, or still see a just-deleted one, until the TTL elapses. Writes
//! must not touch the cache; only expiry and manual invalidation do.
//!
//! One global slot: the cached view carries no viewer-specific data, so
//! there is nothing to key on. During an expiry race, two requests may both
//! recompute and both store — the overwrite is idempotent, so the only cost
//! is the redundant computation.

use std::{
  sync::{Mutex, PoisonError},
  time::{Duration, Instant},
};

use quill_core::{page::Page, post::Post};

/// How long a rendered landing page is served before recomputation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(20);

struct Entry {
  stored_at: Instant,
  page:      Page<Post>,
}

/// A single-slot cache, injected into [`crate::FeedComposer`] explicitly —
/// never a process-wide singleton.
pub struct FeedCache {
  ttl:  Duration,
  slot: Mutex<Option<Entry>>,
}

impl Default for FeedCache {
  fn default() -> Self { Self::new(DEFAULT_TTL) }
}

impl FeedCache {
  pub fn new(ttl: Duration) -> Self {
    Self { ttl, slot: Mutex::new(None) }
  }

  /// The cached page, if one is present and younger than the TTL.
  pub fn lookup(&self) -> Option<Page<Post>> {
    let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    match slot.as_ref() {
      Some(entry) if entry.stored_at.elapsed() < self.ttl => {
        tracing::debug!("feed cache hit");
        Some(entry.page.clone())
      }
      _ => None,
    }
  }

  /// Store a freshly-rendered page. Overwrites whatever is in the slot.
  pub fn store(&self, page: Page<Post>) {
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Entry { stored_at: Instant::now(), page });
  }

  /// Manual clear. The next lookup misses, forcing recomputation.
  pub fn invalidate(&self) {
    tracing::debug!("feed cache invalidated");
    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
  }
}
