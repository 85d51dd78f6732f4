//! Remote catalog access.
//!
//! The rest of the crate only talks to the catalog through the
//! [`CatalogClient`] trait, so aggregation and caching logic can be exercised
//! against stub implementations and the HTTP details stay in one place.
//!
//! # Module layout
//!
//! - [`client`] -- Trait definition for the remote catalog.
//! - [`tmdb`] -- TMDB v3 implementation backed by `reqwest`.

pub mod client;
pub mod tmdb;

pub use client::CatalogClient;
pub use tmdb::{TmdbClient, TmdbSettings};
