//! Core catalog types: movies, genres, and paged results.
//!
//! Every field the remote catalog may omit is an `Option`. Values are never
//! mutated in place once built from a response; helpers such as
//! [`Movie::with_runtime`] return a new value instead.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{GenreId, MovieId};

/// A single movie as listed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier. Absent values are valid and never deduplicated.
    pub id: Option<MovieId>,
    /// Path fragment of the poster image, relative to the image host.
    pub poster_path: Option<String>,
    /// Synopsis text.
    pub overview: Option<String>,
    /// Release date as `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Localised title.
    pub title: Option<String>,
    /// Title in the original language.
    pub original_title: Option<String>,
    /// ISO-639-1 code of the original language.
    pub original_language: Option<String>,
    /// Average community rating, typically 0.0 - 10.0.
    #[serde(alias = "vote_average")]
    pub rating: Option<f64>,
    /// Runtime in minutes. Listing endpoints never fill this in; it is
    /// looked up per movie on demand.
    pub runtime: Option<u32>,
}

impl Movie {
    /// Return a copy of this movie with `runtime` set.
    #[must_use]
    pub fn with_runtime(&self, minutes: u32) -> Self {
        Self {
            runtime: Some(minutes),
            ..self.clone()
        }
    }

    /// Title to show to a user, falling back to the original title.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.original_title.as_deref())
    }

    /// Year component of [`release_date`](Self::release_date), if it parses.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.year())
    }
}

/// A movie genre such as "Action" or "Comedy".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    /// Catalog identifier.
    pub id: GenreId,
    /// Display name.
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One page of movies for a query, as returned by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-based page number this result belongs to.
    pub page: u32,
    /// Movies on this page, in the order the API returned them.
    pub movies: Vec<Movie>,
    /// Total number of pages the API reports for the query.
    pub total_pages: u32,
}

/// Movies merged from several pages, in ascending page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Movies from every successful page, page 1 first.
    pub movies: Vec<Movie>,
    /// Total number of pages the API reports for the query, or `0` when no
    /// page succeeded.
    pub total_pages: u32,
    /// Pages that were requested, within the known total, and failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_pages: Vec<u32>,
}

impl AggregatedResult {
    /// Number of movies in the aggregation.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the aggregation holds no movies.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Whether some requested pages failed and were left out.
    pub fn is_partial(&self) -> bool {
        !self.failed_pages.is_empty()
    }
}
