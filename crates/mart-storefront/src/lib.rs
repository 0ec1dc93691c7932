//! Storefront state for Mobile Mart.
//!
//! Ties the catalog, cart and search logic from `mart-commerce` to a catalog
//! source: either the built-in inventory filtered in memory, or the remote
//! catalog service filtered server-side.
//!
//! # Example
//!
//! ```rust,ignore
//! use mart_storefront::prelude::*;
//! use mart_commerce::prelude::*;
//!
//! let config = StorefrontConfig::from_env_or_default();
//! mart_observability::init(&config.logging);
//!
//! let mut store = Storefront::from_config(&config.catalog);
//! store.refresh().await;
//!
//! if let Some(request) = store.set_category(CategoryFilter::Only(Condition::New)) {
//!     let outcome = request.run().await;
//!     store.complete_load(outcome);
//! }
//!
//! for product in store.visible_products() {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod seed;
pub mod source;
pub mod storefront;

pub use config::{CatalogConfig, CatalogMode, StorefrontConfig};
pub use error::CatalogError;
pub use loader::CatalogLoader;
pub use source::{CatalogSource, RemoteCatalog, StaticCatalog};
pub use storefront::{Applied, LoadOutcome, LoadRequest, LoadStatus, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CatalogConfig, CatalogMode, StorefrontConfig};
    pub use crate::error::CatalogError;
    pub use crate::loader::CatalogLoader;
    pub use crate::source::{CatalogSource, RemoteCatalog, StaticCatalog};
    pub use crate::storefront::{Applied, LoadOutcome, LoadRequest, LoadStatus, Storefront};
}
