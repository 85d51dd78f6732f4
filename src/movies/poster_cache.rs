//! In-memory poster image cache.
//!
//! Caches poster bytes by path for the lifetime of the process so scrolling
//! back over a row never refetches its image. Entries are never evicted.
//!
//! A miss registers a [`Shared`] fetch future under its path. Concurrent
//! misses on the same path await that future instead of issuing their own
//! fetch, and all of them observe the same outcome, error included. Once the
//! fetch settles the in-flight entry is removed and only successful bytes
//! are kept, so a failure is not cached and the next lookup retries.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use moviebrowser_common::Result;
use tracing::debug;

type InFlight = Shared<BoxFuture<'static, Result<Bytes>>>;

/// Hit/miss counters for a [`PosterCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered without a fetch of their own, including lookups that
    /// waited on another caller's in-flight fetch.
    pub hits: u64,
    /// Lookups that started a fetch.
    pub misses: u64,
    /// Paths currently holding image bytes.
    pub entries: usize,
    /// Paths with a fetch still running.
    pub in_flight: usize,
}

/// Thread-safe read-through cache for poster images.
#[derive(Default)]
pub struct PosterCache {
    entries: DashMap<String, Bytes>,
    in_flight: DashMap<String, InFlight>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for PosterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterCache")
            .field("stats", &self.stats())
            .finish()
    }
}

impl PosterCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached bytes for `path`, or run `fetch` and cache its result.
    ///
    /// Exactly one outcome is produced per call: the cached bytes, the freshly
    /// fetched bytes, or the fetch error. At most one fetch per path runs at a
    /// time; callers arriving while it runs share its outcome.
    pub async fn get_or_fetch<F, Fut>(&self, path: &str, fetch: F) -> Result<Bytes>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes>> + Send + 'static,
    {
        if let Some(bytes) = self.get(path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(bytes);
        }

        let (pending, started) = match self.in_flight.entry(path.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                // A fetch may have settled between the lookup above and here.
                if let Some(bytes) = self.get(path) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(bytes);
                }
                let pending = fetch().boxed().shared();
                entry.insert(pending.clone());
                (pending, true)
            }
        };

        if started {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        let result = pending.clone().await;

        // Whichever awaiter finishes first settles the entry; bytes land in
        // the cache before the in-flight handle disappears.
        if let Ok(bytes) = &result {
            self.entries
                .entry(path.to_string())
                .or_insert_with(|| bytes.clone());
        }
        if self
            .in_flight
            .remove_if(path, |_, current| current.ptr_eq(&pending))
            .is_some()
        {
            debug!(path, ok = result.is_ok(), "Poster fetch settled");
        }
        result
    }

    /// Cached bytes for `path`, without fetching.
    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.entries.get(path).map(|bytes| bytes.clone())
    }

    /// Whether `path` has cached bytes.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
            in_flight: self.in_flight.len(),
        }
    }
}
