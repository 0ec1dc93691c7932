//! Catalog sources.

use std::sync::Arc;

use async_trait::async_trait;
use mart_commerce::catalog::{normalize_catalog, Product};
use mart_commerce::search::{query_pairs, FilterCriteria, FilterMode};
use mart_data::FetchClient;
use serde_json::Value;

use crate::config::{CatalogConfig, CatalogMode};
use crate::error::CatalogError;
use crate::seed;

/// Path of the product listing on the catalog service.
pub const PRODUCTS_PATH: &str = "/api/products";

/// Something that can produce the product collection.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Where the criteria are evaluated for products from this source.
    fn filter_mode(&self) -> FilterMode;

    /// Load products for the given criteria.
    ///
    /// Sources in [`FilterMode::Local`] ignore the criteria and return the
    /// whole catalog.
    async fn load(&self, criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError>;
}

/// Build the source described by the configuration.
pub fn from_config(config: &CatalogConfig) -> Arc<dyn CatalogSource> {
    match config.mode {
        CatalogMode::Static => Arc::new(StaticCatalog::demo()),
        CatalogMode::Remote => Arc::new(RemoteCatalog::new(&config.base_url)),
    }
}

/// A fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in shop inventory.
    pub fn demo() -> Self {
        Self::new(seed::inventory())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn filter_mode(&self) -> FilterMode {
        FilterMode::Local
    }

    async fn load(&self, _criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

/// The catalog service, filtering server-side.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: FetchClient,
}

impl RemoteCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new().with_base_url(base_url))
    }

    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    fn filter_mode(&self) -> FilterMode {
        FilterMode::Server
    }

    async fn load(&self, criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError> {
        let body: Value = self
            .client
            .get(PRODUCTS_PATH)
            .accept("application/json")
            .query(query_pairs(criteria))
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let products = normalize_catalog(&body);
        tracing::debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}
