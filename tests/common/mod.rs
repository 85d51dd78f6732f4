//! Shared helpers for integration tests.
//!
//! Provides [`MockCatalog`], a wiremock server that speaks enough of the
//! TMDB v3 API for the client and the movie provider to run against it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use moviebrowser::catalog::{CatalogClient, TmdbClient, TmdbSettings};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// A mock TMDB server plus a client pointed at it.
pub struct MockCatalog {
    pub server: MockServer,
}

impl MockCatalog {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Settings that send every request, including images, to the mock server.
    pub fn settings(&self) -> TmdbSettings {
        TmdbSettings {
            api_key: API_KEY.to_string(),
            api_base_url: self.server.uri(),
            image_base_url: format!("{}/images", self.server.uri()),
            timeout: Duration::from_secs(5),
            requests_per_second: 1000,
            ..TmdbSettings::default()
        }
    }

    pub fn client(&self) -> TmdbClient {
        TmdbClient::new(self.settings())
    }

    pub fn catalog(&self) -> Arc<dyn CatalogClient> {
        Arc::new(self.client())
    }

    /// Serve `count` movies for `page` of `genre`, after `delay`.
    pub async fn mount_page(&self, genre: i64, page: u32, count: u32, total: u32, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("with_genres", genre.to_string()))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(discover_body(page, count, total))
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve a discover page with explicit movie objects.
    pub async fn mount_page_json(&self, genre: i64, page: u32, results: Value, total: u32) {
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("with_genres", genre.to_string()))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page,
                "results": results,
                "total_pages": total,
            })))
            .mount(&self.server)
            .await;
    }

    /// Fail `page` of `genre` with `status`.
    pub async fn mount_failed_page(&self, genre: i64, page: u32, status: u16) {
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("with_genres", genre.to_string()))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_runtime(&self, movie_id: i64, runtime: Option<u32>) {
        Mock::given(method("GET"))
            .and(path(format!("/movie/{movie_id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": movie_id, "runtime": runtime })),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve `bytes` for poster `poster_path`, expecting exactly `times` requests.
    pub async fn mount_poster(&self, poster_path: &str, bytes: &'static [u8], times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/images{poster_path}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(bytes)
                    .insert_header("content-type", "image/jpeg")
                    .set_delay(Duration::from_millis(20)),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }
}

/// Discover body with movies numbered `(page - 1) * count + 1 ..`.
pub fn discover_body(page: u32, count: u32, total: u32) -> Value {
    let first = (page - 1) * count + 1;
    let results: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Movie {id}"),
                "overview": "",
                "poster_path": format!("/poster-{id}.jpg"),
                "release_date": "2020-01-01",
                "vote_average": f64::from(id % 10),
            })
        })
        .collect();
    json!({
        "page": page,
        "results": results,
        "total_pages": total,
        "total_results": total * count,
    })
}

/// Movie ids in order; `-1` for a movie without one.
pub fn ids(movies: &[moviebrowser::Movie]) -> Vec<i64> {
    movies
        .iter()
        .map(|m| m.id.map_or(-1, |id| id.get()))
        .collect()
}
