//! Product catalog module.
//!
//! Contains the product type and the normalizer for raw catalog records.

mod normalize;
mod product;

pub use normalize::{normalize_catalog, normalize_record};
pub use product::{Condition, Product, DEFAULT_PRODUCT_IMAGE};
