//! Post-join search pipeline and superseded-search detection.
//!
//! A bulk search first aggregates pages (see [`super::aggregate`]) and only
//! then runs [`refine`] over the merged list: deduplicate, filter by title,
//! sort by rating.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use moviebrowser_common::Movie;

/// Deduplicate, filter by `query`, and sort by rating, in that order.
pub fn refine(movies: Vec<Movie>, query: &str) -> Vec<Movie> {
    let mut movies = filter_by_title(dedupe_by_id(movies), query);
    sort_by_rating_desc(&mut movies);
    movies
}

/// Collapse movies sharing an id, keeping the first occurrence.
///
/// Movies without an id have no identity and are all kept.
pub fn dedupe_by_id(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies
        .into_iter()
        .filter(|movie| match movie.id {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

/// Keep movies whose title contains `query` (case-sensitive).
///
/// An empty query keeps everything, untitled movies included; a non-empty
/// query never matches an untitled movie.
pub fn filter_by_title(movies: Vec<Movie>, query: &str) -> Vec<Movie> {
    if query.is_empty() {
        return movies;
    }
    movies
        .into_iter()
        .filter(|movie| movie.title.as_deref().is_some_and(|t| t.contains(query)))
        .collect()
}

/// Stable sort by rating, highest first. Unrated movies go last.
pub fn sort_by_rating_desc(movies: &mut [Movie]) {
    movies.sort_by(|a, b| compare_rating_desc(a.rating, b.rating));
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Superseded searches
// ---------------------------------------------------------------------------

/// Identifies one search request issued through a [`SearchGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Tracks which search is the most recent one.
///
/// Searches are never cancelled: a slow search still runs to completion.
/// A caller that issues a ticket per search can use
/// [`is_current`](Self::is_current) to drop results that a newer search has
/// already replaced.
#[derive(Debug, Default)]
pub struct SearchGuard {
    latest: AtomicU64,
}

impl SearchGuard {
    /// Create a guard with no searches issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new search, superseding every earlier ticket.
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, AtomicOrdering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recently issued one.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(AtomicOrdering::SeqCst) == ticket.0
    }
}
