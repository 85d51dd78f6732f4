//! Caller-side state for an infinitely scrolling genre listing.

use moviebrowser_common::{GenreId, Movie, Result};
use tracing::debug;

use super::provider::MoviesProvider;

/// Movies loaded so far for one genre, plus the page bookkeeping needed to
/// load more.
///
/// The provider itself is stateless; a feed is what a list view would own.
#[derive(Debug, Clone)]
pub struct MovieFeed {
    genre_id: GenreId,
    movies: Vec<Movie>,
    loaded_pages: u32,
    total_pages: Option<u32>,
}

impl MovieFeed {
    /// Create an empty feed for `genre_id`.
    pub fn new(genre_id: GenreId) -> Self {
        Self {
            genre_id,
            movies: Vec::new(),
            loaded_pages: 0,
            total_pages: None,
        }
    }

    /// Replace the feed's contents with the first `pages` pages.
    ///
    /// Returns the number of movies loaded. On error the feed is unchanged.
    pub async fn load_initial(&mut self, provider: &MoviesProvider, pages: u32) -> Result<usize> {
        let result = provider.aggregate_pages(self.genre_id, pages).await?;
        self.loaded_pages = pages.min(result.total_pages);
        self.total_pages = Some(result.total_pages);
        self.movies = result.movies;
        Ok(self.movies.len())
    }

    /// Append the next page, if there is one.
    ///
    /// Returns the number of movies appended; `0` once every page is loaded.
    /// On error the feed is unchanged, so the same page is retried next time.
    pub async fn load_next(&mut self, provider: &MoviesProvider) -> Result<usize> {
        if !self.has_more() {
            return Ok(0);
        }
        let page = provider
            .extend_by_one_page(self.genre_id, self.loaded_pages)
            .await?;
        let added = page.movies.len();
        self.loaded_pages += 1;
        self.total_pages = Some(page.total_pages);
        self.movies.extend(page.movies);
        debug!(
            genre_id = %self.genre_id,
            page = self.loaded_pages,
            added,
            "Feed extended"
        );
        Ok(added)
    }

    /// Whether more pages may be available.
    pub fn has_more(&self) -> bool {
        self.total_pages
            .map_or(true, |total| self.loaded_pages < total)
    }

    /// Genre this feed lists.
    pub fn genre_id(&self) -> GenreId {
        self.genre_id
    }

    /// Movies loaded so far, in page order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Highest page loaded so far.
    pub fn loaded_pages(&self) -> u32 {
        self.loaded_pages
    }

    /// Total pages reported by the catalog, once known.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, StubCatalog};
    use moviebrowser_common::Error;
    use std::sync::Arc;

    #[tokio::test]
    async fn scrolls_until_the_last_page() {
        let catalog = StubCatalog::new()
            .with_page(1, 2, 4)
            .with_page(2, 2, 4)
            .with_page(3, 2, 4)
            .with_page(4, 2, 4);
        let provider = MoviesProvider::new(Arc::new(catalog));
        let mut feed = MovieFeed::new(GenreId::new(28));
        assert!(feed.has_more());

        assert_eq!(feed.load_initial(&provider, 2).await.unwrap(), 4);
        assert_eq!(feed.loaded_pages(), 2);
        assert_eq!(feed.total_pages(), Some(4));

        assert_eq!(feed.load_next(&provider).await.unwrap(), 2);
        assert_eq!(feed.load_next(&provider).await.unwrap(), 2);
        assert!(!feed.has_more());
        assert_eq!(feed.load_next(&provider).await.unwrap(), 0);

        assert_eq!(ids(feed.movies()), (1..=8).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn initial_load_clamps_to_total() {
        let catalog = StubCatalog::new()
            .with_page(1, 3, 1)
            .with_failed_page(2, Error::api(422, "out of range"));
        let provider = MoviesProvider::new(Arc::new(catalog));
        let mut feed = MovieFeed::new(GenreId::new(99));

        feed.load_initial(&provider, 2).await.unwrap();
        assert_eq!(feed.loaded_pages(), 1);
        assert!(!feed.has_more());
    }

    #[tokio::test]
    async fn failed_extension_leaves_feed_unchanged() {
        let catalog = StubCatalog::new()
            .with_page(1, 2, 3)
            .with_failed_page(2, Error::transport("offline"));
        let provider = MoviesProvider::new(Arc::new(catalog));
        let mut feed = MovieFeed::new(GenreId::new(28));

        feed.load_initial(&provider, 1).await.unwrap();
        assert!(feed.load_next(&provider).await.is_err());
        assert_eq!(feed.loaded_pages(), 1);
        assert_eq!(feed.movies().len(), 2);
        assert!(feed.has_more());
    }
}
