use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::tmdb::{TmdbSettings, TMDB_API_BASE, TMDB_IMAGE_BASE};
use crate::movies::DEFAULT_MAX_CONCURRENCY;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TMDB v3 API key
    #[serde(default)]
    pub api_key: String,

    /// Language tag sent with every request (default: en-US)
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Prefix poster paths are appended to; pick the size segment here
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Client-side rate limit (default: 40)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_language() -> String {
    "en-US".to_string()
}
fn default_api_base_url() -> String {
    TMDB_API_BASE.to_string()
}
fn default_image_base_url() -> String {
    TMDB_IMAGE_BASE.to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_requests_per_second() -> u32 {
    40
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: default_timeout(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl From<&CatalogConfig> for TmdbSettings {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            api_base_url: config.api_base_url.clone(),
            image_base_url: config.image_base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            requests_per_second: config.requests_per_second,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowseConfig {
    /// Pages aggregated when a genre is first opened (default: 3)
    #[serde(default = "default_initial_pages")]
    pub initial_pages: u32,

    /// Pages scanned by a search (default: 10)
    #[serde(default = "default_search_max_pages")]
    pub search_max_pages: u32,

    /// Page requests one aggregation keeps in flight (default: 16)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_initial_pages() -> u32 {
    3
}
fn default_search_max_pages() -> u32 {
    10
}
fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            initial_pages: default_initial_pages(),
            search_max_pages: default_search_max_pages(),
            max_concurrency: default_max_concurrency(),
        }
    }
}
