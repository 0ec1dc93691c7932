//! Search module.
//!
//! Contains filter criteria, the client-side filter engine, brand options
//! and the query-parameter translation used for server-side filtering.

mod brands;
mod criteria;
mod filter;
mod query;

pub use brands::brand_options;
pub use criteria::{
    BrandFilter, CategoryFilter, FilterCriteria, ALL_OPTION, MAX_PRICE_BOUND, MIN_PRICE_BOUND,
    PRICE_STEP,
};
pub use filter::{filter_products, FilterMode};
pub use query::{query_pairs, PARAM_BRAND, PARAM_CONDITION, PARAM_MAX_PRICE, PARAM_QUERY};
