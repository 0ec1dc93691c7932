//! Translation of filter criteria into catalog service query parameters.

use crate::search::{BrandFilter, CategoryFilter, FilterCriteria};

/// Query parameter carrying the condition.
pub const PARAM_CONDITION: &str = "condition";
/// Query parameter carrying the brand.
pub const PARAM_BRAND: &str = "brand";
/// Query parameter carrying the max price.
pub const PARAM_MAX_PRICE: &str = "max_price";
/// Query parameter carrying the text query.
pub const PARAM_QUERY: &str = "q";

/// Query parameters for server-side filtering.
///
/// Criteria at their default value are omitted, so default criteria produce
/// no parameters at all. Pairs come out in a fixed order: condition, brand,
/// max price, query.
pub fn query_pairs(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if let CategoryFilter::Only(condition) = criteria.category {
        pairs.push((PARAM_CONDITION, condition.as_str().to_string()));
    }

    if let BrandFilter::Only(brand) = &criteria.brand {
        pairs.push((PARAM_BRAND, brand.clone()));
    }

    if let Some(max_price) = criteria.max_price {
        pairs.push((PARAM_MAX_PRICE, max_price.amount().to_string()));
    }

    let query = criteria.trimmed_query();
    if !query.is_empty() {
        pairs.push((PARAM_QUERY, query.to_string()));
    }

    pairs
}
