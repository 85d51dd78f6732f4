//! Moviebrowser-Common: Shared catalog types, IDs, and errors.
//!
//! This crate provides the vocabulary shared by the catalog client and the
//! movie aggregation layer:
//!
//! - **Typed IDs**: Integer wrappers for genre and movie identifiers
//! - **Catalog Types**: [`Movie`], [`Genre`], [`PageResult`], [`AggregatedResult`]
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use moviebrowser_common::{Error, GenreId, Movie, Result};
//!
//! let action = GenreId::new(28);
//! assert_eq!(action.to_string(), "28");
//!
//! let movie = Movie::default().with_runtime(139);
//! assert_eq!(movie.runtime, Some(139));
//!
//! fn example() -> Result<()> {
//!     Err(Error::no_data("every page failed"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
