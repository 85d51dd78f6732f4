//! Scripted catalog backend shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use moviebrowser_common::{Error, Genre, GenreId, Movie, MovieId, PageResult, Result};
use parking_lot::Mutex;

use crate::catalog::CatalogClient;

/// A catalog whose every reply is scripted up front.
///
/// Unscripted pages, runtimes, and images answer with an `Api` 404 error.
#[derive(Default)]
pub struct StubCatalog {
    pages: HashMap<u32, Result<PageResult>>,
    page_delays: HashMap<u32, Duration>,
    runtimes: HashMap<MovieId, Result<u32>>,
    images: HashMap<String, Result<Bytes>>,
    image_delay: Duration,
    genres: Vec<Genre>,
    page_calls: Mutex<Vec<u32>>,
    completed_pages: Mutex<Vec<u32>>,
    image_calls: AtomicUsize,
    runtime_calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `count` generated movies for `page`.
    pub fn with_page(mut self, page: u32, count: usize, total_pages: u32) -> Self {
        self.pages.insert(
            page,
            Ok(PageResult {
                page,
                movies: make_movies(page, count),
                total_pages,
            }),
        );
        self
    }

    /// Script an explicit movie list for `page`.
    pub fn with_movies(mut self, page: u32, movies: Vec<Movie>, total_pages: u32) -> Self {
        self.pages.insert(
            page,
            Ok(PageResult {
                page,
                movies,
                total_pages,
            }),
        );
        self
    }

    pub fn with_failed_page(mut self, page: u32, error: Error) -> Self {
        self.pages.insert(page, Err(error));
        self
    }

    /// Delay the reply for `page`, to control arrival order.
    pub fn with_delay(mut self, page: u32, millis: u64) -> Self {
        self.page_delays.insert(page, Duration::from_millis(millis));
        self
    }

    pub fn with_runtime(mut self, id: i64, runtime: Result<u32>) -> Self {
        self.runtimes.insert(MovieId::new(id), runtime);
        self
    }

    pub fn with_image(mut self, path: &str, image: Result<Bytes>) -> Self {
        self.images.insert(path.to_string(), image);
        self
    }

    pub fn with_image_delay(mut self, millis: u64) -> Self {
        self.image_delay = Duration::from_millis(millis);
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = genres;
        self
    }

    /// Pages in the order they were requested.
    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().clone()
    }

    /// Pages in the order their replies completed.
    pub fn completed_pages(&self) -> Vec<u32> {
        self.completed_pages.lock().clone()
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn runtime_calls(&self) -> usize {
        self.runtime_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_page(&self, _genre_id: GenreId, page: u32) -> Result<PageResult> {
        self.page_calls.lock().push(page);
        if let Some(delay) = self.page_delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        self.completed_pages.lock().push(page);
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(Error::api(404, format!("unscripted page {page}"))))
    }

    async fn fetch_runtime(&self, movie_id: MovieId) -> Result<u32> {
        self.runtime_calls.fetch_add(1, Ordering::SeqCst);
        self.runtimes
            .get(&movie_id)
            .cloned()
            .unwrap_or_else(|| Err(Error::api(404, format!("unscripted movie {movie_id}"))))
    }

    async fn fetch_image(&self, path: &str) -> Result<Bytes> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if !self.image_delay.is_zero() {
            tokio::time::sleep(self.image_delay).await;
        }
        self.images
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(Error::api(404, format!("unscripted image {path}"))))
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.clone())
    }
}

/// Build `count` movies for `page`, numbered so that page order is visible:
/// page 1 holds ids 1..=count, page 2 the next `count`, and so on.
pub fn make_movies(page: u32, count: usize) -> Vec<Movie> {
    let first = (page as i64 - 1) * count as i64 + 1;
    (0..count as i64)
        .map(|offset| make_movie(first + offset, &format!("Movie {}", first + offset), None))
        .collect()
}

pub fn make_movie(id: i64, title: &str, rating: Option<f64>) -> Movie {
    Movie {
        id: Some(MovieId::new(id)),
        title: Some(title.to_string()),
        poster_path: Some(format!("/poster-{id}.jpg")),
        rating,
        ..Movie::default()
    }
}

/// Raw ids of a movie list, in order.
pub fn ids(movies: &[Movie]) -> Vec<i64> {
    movies
        .iter()
        .map(|m| m.id.map(MovieId::get).unwrap_or(-1))
        .collect()
}
