//! Catalog, cart and search logic for the Mobile Mart storefront.
//!
//! This crate holds the pure, synchronous half of the storefront:
//!
//! - **Catalog**: products, conditions, and normalization of raw catalog JSON
//! - **Cart**: lines keyed by product id, quantity controls, totals
//! - **Search**: filter criteria, the client-side filter engine, brand
//!   options, and query parameters for server-side filtering
//!
//! # Example
//!
//! ```rust
//! use mart_commerce::prelude::*;
//!
//! let catalog = vec![
//!     Product::new("p1", "iPhone 12", "Apple", Condition::New, Money::new(35999)),
//!     Product::new("p2", "Galaxy S21", "Samsung", Condition::Used, Money::new(24999)),
//! ];
//!
//! let criteria = FilterCriteria::new().with_category(CategoryFilter::Only(Condition::New));
//! let visible = filter_products(&catalog, &criteria);
//! assert_eq!(visible.len(), 1);
//!
//! let mut cart = Cart::new();
//! cart.add(visible[0]).unwrap();
//! cart.add(visible[0]).unwrap();
//! assert_eq!(cart.total().unwrap().display(), "\u{20b9}71,998");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{normalize_catalog, Condition, Product, DEFAULT_PRODUCT_IMAGE};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary, LineSummary, MAX_QUANTITY_PER_LINE};

    // Search
    pub use crate::search::{
        brand_options, filter_products, query_pairs, BrandFilter, CategoryFilter,
        FilterCriteria, FilterMode,
    };
}
