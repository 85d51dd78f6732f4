//! Concurrent page fan-out and deterministic join.
//!
//! [`aggregate_pages`] requests pages `1..=page_count` concurrently and only
//! returns once every request has settled. Replies arrive in whatever order
//! the network delivers them; they are recorded in a [`PageCollector`] keyed
//! by page number and merged in ascending page order, so the output never
//! depends on arrival order.
//!
//! The collector is created per call and owned by the join, so concurrent
//! aggregations never share bookkeeping.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use moviebrowser_common::{AggregatedResult, Error, GenreId, PageResult, Result};
use tracing::{debug, info, warn};

use crate::catalog::CatalogClient;

/// Fan-out used when the caller does not configure one.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Fetch pages `1..=page_count` of a genre concurrently and merge them.
///
/// At most `max_concurrency` requests are in flight at once (`0` is treated
/// as `1`). See [`PageCollector::finish`] for how successes and failures are
/// combined.
pub async fn aggregate_pages(
    catalog: &dyn CatalogClient,
    genre_id: GenreId,
    page_count: u32,
    max_concurrency: usize,
) -> Result<AggregatedResult> {
    if page_count == 0 {
        return Err(Error::invalid_input("page count must be at least 1"));
    }

    debug!(
        genre_id = %genre_id,
        page_count,
        backend = catalog.name(),
        "Dispatching page fetches"
    );

    // Join barrier: the fold only resolves after every fetch has settled.
    let collector = stream::iter(1..=page_count)
        .map(|page| async move { (page, catalog.fetch_page(genre_id, page).await) })
        .buffer_unordered(max_concurrency.max(1))
        .fold(PageCollector::new(), |mut collector, (page, reply)| async move {
            if let Err(ref e) = reply {
                warn!(
                    genre_id = %genre_id,
                    page,
                    transient = e.is_transient(),
                    error = %e,
                    "Page fetch failed"
                );
            }
            collector.record(page, reply);
            collector
        })
        .await;

    let result = collector.finish()?;
    info!(
        genre_id = %genre_id,
        movies = result.movies.len(),
        total_pages = result.total_pages,
        failed_pages = ?result.failed_pages,
        "Aggregated pages"
    );
    Ok(result)
}

/// Per-call accumulation of page replies.
///
/// Replies may be recorded in any order; [`finish`](Self::finish) only looks
/// at page numbers.
#[derive(Debug, Default)]
pub struct PageCollector {
    successes: BTreeMap<u32, PageResult>,
    failures: BTreeMap<u32, Error>,
}

impl PageCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the reply for `page`. The requested page number is the key,
    /// whatever page number the reply itself claims.
    pub fn record(&mut self, page: u32, reply: Result<PageResult>) {
        match reply {
            Ok(result) => {
                self.successes.insert(page, result);
            }
            Err(e) => {
                self.failures.insert(page, e);
            }
        }
    }

    /// Number of replies recorded so far.
    pub fn settled(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Merge the recorded replies.
    ///
    /// - The total page count comes from the lowest-numbered successful page.
    /// - Pages beyond that total are dropped, successes and failures alike.
    /// - With at least one success, the result is the concatenation of every
    ///   successful page in ascending page order; failed pages are listed in
    ///   [`AggregatedResult::failed_pages`].
    /// - With no success, the error of the lowest-numbered page is returned.
    /// - With no replies at all, the result is empty.
    pub fn finish(self) -> Result<AggregatedResult> {
        let Some(total_pages) = self.successes.values().next().map(|p| p.total_pages) else {
            return match self.failures.into_iter().next() {
                Some((_, e)) => Err(e),
                None => Ok(AggregatedResult::default()),
            };
        };

        let failed_pages = self
            .failures
            .keys()
            .copied()
            .filter(|page| *page <= total_pages)
            .collect();

        let movies = self
            .successes
            .into_iter()
            .filter(|(page, _)| *page <= total_pages)
            .flat_map(|(_, result)| result.movies)
            .collect();

        Ok(AggregatedResult {
            movies,
            total_pages,
            failed_pages,
        })
    }
}
