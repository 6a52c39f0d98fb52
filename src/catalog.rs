//! Product catalog collaborator.

use crate::types::Artwork;
use futures::future::BoxFuture;
use thiserror::Error;

/// Sample catalog bundled with the application.
pub const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog payload is not a list of artworks
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog service could not be reached
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of the artwork catalog, consumed once at startup.
pub trait CatalogProvider {
    /// Fetches every product.
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<Artwork>, CatalogError>>;
}

/// Catalog backed by a JSON document held in memory.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    json: String,
}

impl StaticCatalog {
    /// Wraps a JSON array of artwork records.
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    /// The catalog shipped in `assets/catalog.json`.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_CATALOG)
    }

    /// Parses the catalog synchronously.
    pub fn parse(&self) -> Result<Vec<Artwork>, CatalogError> {
        let artworks: Vec<Artwork> = serde_json::from_str(&self.json)?;
        Ok(artworks)
    }
}

impl CatalogProvider for StaticCatalog {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<Artwork>, CatalogError>> {
        let result = self.parse();
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let artworks = StaticCatalog::bundled().parse().unwrap();
        assert!(!artworks.is_empty());
        assert!(artworks.iter().all(|a| !a.id.is_empty() && !a.variants.is_empty()));
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let result = futures::executor::block_on(StaticCatalog::new("{\"not\": \"a list\"}").fetch());
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
