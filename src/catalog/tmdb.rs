//! TMDB (The Movie Database) catalog client.
//!
//! Implements [`CatalogClient`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - Configurable request timeout.
//! - Response bodies are decoded separately from the transport so malformed
//!   JSON surfaces as [`Error::Decode`] rather than a transport failure.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use governor::{Quota, RateLimiter};
use moviebrowser_common::{Error, Genre, GenreId, Movie, MovieId, PageResult, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::client::CatalogClient;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default TMDB v3 API root.
pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
/// Default poster host, sized for list rows.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const MAX_RETRIES: u32 = 3;

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    page: Option<u32>,
    results: Vec<Movie>,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct MovieDetail {
    runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Connection settings for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    /// TMDB v3 API key.
    pub api_key: String,
    /// ISO-639-1 language tag such as `"en-US"`.
    pub language: String,
    /// API root, without a trailing slash.
    pub api_base_url: String,
    /// Image host prefix that poster paths are appended to.
    pub image_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Token-bucket refill rate. `0` is treated as `1`.
    pub requests_per_second: u32,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: "en-US".to_string(),
            api_base_url: TMDB_API_BASE.to_string(),
            image_base_url: TMDB_IMAGE_BASE.to_string(),
            timeout: Duration::from_secs(30),
            requests_per_second: 40,
        }
    }
}

// ---------------------------------------------------------------------------
// Client implementation
// ---------------------------------------------------------------------------

/// TMDB catalog client.
///
/// Wraps the TMDB v3 REST API with built-in rate limiting and 429 retry.
///
/// # Examples
///
/// ```no_run
/// use moviebrowser::catalog::{TmdbClient, TmdbSettings};
///
/// let client = TmdbClient::new(TmdbSettings {
///     api_key: "your-api-key".into(),
///     ..TmdbSettings::default()
/// });
/// ```
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    language: String,
    api_base_url: String,
    image_base_url: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbClient {
    /// Create a new TMDB client from connection settings.
    pub fn new(settings: TmdbSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client with timeout");
                reqwest::Client::new()
            });

        let rate = NonZeroU32::new(settings.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Self {
            client,
            api_key: settings.api_key,
            language: settings.language,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            image_base_url: settings.image_base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        }
    }

    /// Returns `true` when an API key has been configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Execute a GET request with rate limiting and 429-retry logic.
    ///
    /// Non-success statuses other than a retried 429 become [`Error::Api`].
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            // Strip the URL from transport errors: it carries the API key.
            let resp = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| Error::transport(format!("TMDB request failed: {}", e.without_url())))?;

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!(
                    retry = retries,
                    wait_secs = wait,
                    "TMDB returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                let message = if message.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    message
                };
                return Err(Error::api(status.as_u16(), message));
            }

            return Ok(resp);
        }
    }

    /// GET an API path with the key and language attached, then decode JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.api_base_url);
        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        query.extend_from_slice(extra_params);

        let body = self
            .get(&url, &query)
            .await?
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read TMDB response: {}", e.without_url())))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::decode(format!("unexpected TMDB response for {path}: {e}")))
    }

    /// Convert a poster path fragment to a full image URL.
    fn image_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.image_base_url)
        } else {
            format!("{}/{path}", self.image_base_url)
        }
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn fetch_page(&self, genre_id: GenreId, page: u32) -> Result<PageResult> {
        let genre = genre_id.to_string();
        let page_str = page.to_string();
        debug!(genre_id = %genre_id, page, "TMDB discover movies");

        let body: DiscoverResponse = self
            .get_json(
                "/discover/movie",
                &[("with_genres", genre.as_str()), ("page", page_str.as_str())],
            )
            .await?;

        Ok(PageResult {
            page: body.page.unwrap_or(page),
            movies: body.results,
            total_pages: body.total_pages,
        })
    }

    async fn fetch_runtime(&self, movie_id: MovieId) -> Result<u32> {
        debug!(movie_id = %movie_id, "TMDB get movie runtime");

        let detail: MovieDetail = self.get_json(&format!("/movie/{movie_id}"), &[]).await?;
        detail
            .runtime
            .ok_or_else(|| Error::no_data(format!("movie {movie_id} has no runtime")))
    }

    async fn fetch_image(&self, path: &str) -> Result<Bytes> {
        let url = self.image_url(path);
        debug!(url = %url, "TMDB download poster");

        let bytes = self
            .get(&url, &[])
            .await?
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read image bytes: {e}")))?;

        if bytes.is_empty() {
            return Err(Error::no_data(format!("empty image body for {path}")));
        }
        Ok(bytes)
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        debug!("TMDB list movie genres");

        let body: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;
        Ok(body.genres)
    }
}
