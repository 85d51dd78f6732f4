//! Paginated movie aggregation for genre listings.
//!
//! This is the heart of the crate: fetching several catalog pages at once,
//! joining them into one deterministic listing, extending a listing page by
//! page, searching across pages, and caching posters.
//!
//! # Module layout
//!
//! - [`aggregate`] -- Concurrent page fan-out and ordered join.
//! - [`search`] -- Dedupe / filter / sort pipeline and superseded-search guard.
//! - [`poster_cache`] -- Read-through poster cache with in-flight deduplication.
//! - [`provider`] -- [`MoviesProvider`], the entry point for front ends.
//! - [`feed`] -- [`MovieFeed`], caller-side infinite-scroll state.

pub mod aggregate;
pub mod feed;
pub mod poster_cache;
pub mod provider;
pub mod search;

pub use aggregate::{PageCollector, DEFAULT_MAX_CONCURRENCY};
pub use feed::MovieFeed;
pub use poster_cache::{CacheStats, PosterCache};
pub use provider::MoviesProvider;
pub use search::{SearchGuard, SearchTicket};
