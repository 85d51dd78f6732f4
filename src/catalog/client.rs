//! Trait definition for remote catalog backends.

use async_trait::async_trait;
use bytes::Bytes;
use moviebrowser_common::{Genre, GenreId, MovieId, PageResult, Result};

/// Async trait that every remote catalog backend implements.
///
/// Implementations do network I/O and decoding only: no caching, no
/// aggregation, no business rules. Whatever retry policy the backend applies
/// is its own concern; callers treat each method as a single request that
/// either yields a typed value or an error.
///
/// Backends are shared across tasks behind an `Arc`, hence `Send + Sync`.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Short, lowercase identifier for this backend (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Fetch one 1-based page of movies for a genre.
    async fn fetch_page(&self, genre_id: GenreId, page: u32) -> Result<PageResult>;

    /// Fetch the runtime of a movie, in minutes.
    async fn fetch_runtime(&self, movie_id: MovieId) -> Result<u32>;

    /// Fetch raw image bytes for a poster path such as `"/abc123.jpg"`.
    async fn fetch_image(&self, path: &str) -> Result<Bytes>;

    /// Fetch the list of movie genres.
    async fn fetch_genres(&self) -> Result<Vec<Genre>>;
}
