//! Genre listing.

use std::sync::Arc;

use moviebrowser_common::{Genre, Result};
use tracing::debug;

use crate::catalog::CatalogClient;

/// Thin pass-through to the catalog's genre list. No aggregation, no caching.
pub struct GenresProvider {
    catalog: Arc<dyn CatalogClient>,
}

impl GenresProvider {
    /// Create a provider over `catalog`.
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    /// All movie genres, in catalog order.
    pub async fn get_genres(&self) -> Result<Vec<Genre>> {
        let genres = self.catalog.fetch_genres().await?;
        debug!(count = genres.len(), "Fetched genres");
        Ok(genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::StubCatalog;
    use moviebrowser_common::GenreId;

    #[tokio::test]
    async fn passes_genres_through_in_order() {
        let genres = vec![
            Genre {
                id: GenreId::new(28),
                name: "Action".to_string(),
            },
            Genre {
                id: GenreId::new(12),
                name: "Adventure".to_string(),
            },
        ];
        let provider = GenresProvider::new(Arc::new(StubCatalog::new().with_genres(genres.clone())));
        assert_eq!(provider.get_genres().await.unwrap(), genres);
    }
}
