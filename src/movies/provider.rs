//! The movie listing provider.
//!
//! [`MoviesProvider`] is what a front end talks to: it aggregates the first
//! pages of a genre, extends a listing one page at a time, searches across a
//! bounded number of pages, and serves posters and runtimes.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use moviebrowser_common::{AggregatedResult, Error, GenreId, Movie, MovieId, PageResult, Result};
use tracing::{debug, warn};

use super::aggregate::{aggregate_pages, DEFAULT_MAX_CONCURRENCY};
use super::poster_cache::PosterCache;
use super::search::{refine, SearchGuard};
use crate::catalog::CatalogClient;

/// Paginated movie access on top of a [`CatalogClient`].
///
/// The provider holds no per-request state: every aggregation builds its own
/// bookkeeping. The poster cache is the only state shared between calls.
pub struct MoviesProvider {
    catalog: Arc<dyn CatalogClient>,
    posters: PosterCache,
    max_concurrency: usize,
}

impl MoviesProvider {
    /// Create a provider with the default fan-out limit.
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            catalog,
            posters: PosterCache::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Limit how many page requests one aggregation keeps in flight.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Fetch pages `1..=page_count` concurrently and merge them in page order.
    ///
    /// Succeeds with a partial result when at least one page succeeds; fails
    /// with the lowest-numbered page's error when every page fails.
    pub async fn aggregate_pages(
        &self,
        genre_id: GenreId,
        page_count: u32,
    ) -> Result<AggregatedResult> {
        aggregate_pages(
            self.catalog.as_ref(),
            genre_id,
            page_count,
            self.max_concurrency,
        )
        .await
    }

    /// Fetch the page after `current_page`.
    ///
    /// The caller appends the movies to its own list and advances its own
    /// page counter.
    pub async fn extend_by_one_page(
        &self,
        genre_id: GenreId,
        current_page: u32,
    ) -> Result<PageResult> {
        let next = current_page
            .checked_add(1)
            .ok_or_else(|| Error::invalid_input("page number overflow"))?;
        debug!(genre_id = %genre_id, page = next, "Extending listing by one page");
        self.catalog.fetch_page(genre_id, next).await
    }

    /// Search the first `max_pages` pages of a genre.
    ///
    /// All pages are aggregated first; the merged list is then deduplicated by
    /// id, filtered to titles containing `query` (case-sensitive), and sorted
    /// by rating, highest first. A query that matches nothing yields an empty
    /// list.
    ///
    /// Searches are not cancelled when a newer one starts; see
    /// [`search_latest`](Self::search_latest).
    pub async fn search_across_pages(
        &self,
        genre_id: GenreId,
        max_pages: u32,
        query: &str,
    ) -> Result<Vec<Movie>> {
        let aggregated = self.aggregate_pages(genre_id, max_pages).await?;
        let scanned = aggregated.movies.len();
        let matches = refine(aggregated.movies, query);
        debug!(
            genre_id = %genre_id,
            query,
            scanned,
            matched = matches.len(),
            "Search finished"
        );
        Ok(matches)
    }

    /// Like [`search_across_pages`](Self::search_across_pages), but returns
    /// `Ok(None)` when another search was issued through `guard` while this
    /// one was running, whether this one succeeded or failed.
    ///
    /// The superseded search still runs to completion; only its result is
    /// withheld.
    pub async fn search_latest(
        &self,
        guard: &SearchGuard,
        genre_id: GenreId,
        max_pages: u32,
        query: &str,
    ) -> Result<Option<Vec<Movie>>> {
        let ticket = guard.issue();
        let outcome = self.search_across_pages(genre_id, max_pages, query).await;
        if !guard.is_current(ticket) {
            debug!(query, ok = outcome.is_ok(), "Discarding superseded search result");
            return Ok(None);
        }
        outcome.map(Some)
    }

    /// Poster bytes for `path`, from the cache or the catalog.
    pub async fn get_poster(&self, path: &str) -> Result<Bytes> {
        if path.is_empty() {
            return Err(Error::invalid_input("poster path is empty"));
        }
        let catalog = Arc::clone(&self.catalog);
        let owned = path.to_string();
        self.posters
            .get_or_fetch(path, move || async move { catalog.fetch_image(&owned).await })
            .await
    }

    /// Poster bytes for a movie, if it has a poster path.
    pub async fn get_movie_poster(&self, movie: &Movie) -> Option<Result<Bytes>> {
        let path = movie.poster_path.as_deref()?;
        Some(self.get_poster(path).await)
    }

    /// Runtime of a movie in minutes. Not cached.
    pub async fn get_runtime(&self, movie_id: MovieId) -> Result<u32> {
        self.catalog.fetch_runtime(movie_id).await
    }

    /// Look up several runtimes concurrently.
    ///
    /// Results come back in input order, one per id. A failed lookup only
    /// affects its own entry.
    pub async fn get_runtimes(&self, movie_ids: &[MovieId]) -> Vec<(MovieId, Result<u32>)> {
        let lookups = movie_ids
            .iter()
            .map(|id| async move { (*id, self.get_runtime(*id).await) });
        join_all(lookups).await
    }

    /// Return copies of `movies` with runtimes filled in where the lookup
    /// succeeded. Movies without an id, or whose lookup failed, are returned
    /// unchanged.
    pub async fn attach_runtimes(&self, movies: &[Movie]) -> Vec<Movie> {
        let lookups = movies.iter().map(|movie| async move {
            let Some(id) = movie.id else {
                return movie.clone();
            };
            match self.get_runtime(id).await {
                Ok(minutes) => movie.with_runtime(minutes),
                Err(e) => {
                    warn!(movie_id = %id, error = %e, "Runtime lookup failed");
                    movie.clone()
                }
            }
        });
        join_all(lookups).await
    }

    /// The shared poster cache.
    pub fn poster_cache(&self) -> &PosterCache {
        &self.posters
    }
}
