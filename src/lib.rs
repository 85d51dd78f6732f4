//! Moviebrowser - genre-based movie catalog browsing
//!
//! This library crate exposes the catalog client, the paginated movie
//! aggregation core, and configuration loading for the CLI and for
//! integration testing.

pub mod catalog;
pub mod config;
pub mod format;
pub mod genres;
pub mod movies;

#[cfg(test)]
mod test_fixtures;

pub use moviebrowser_common::{
    AggregatedResult, Error, Genre, GenreId, Movie, MovieId, PageResult, Result,
};
