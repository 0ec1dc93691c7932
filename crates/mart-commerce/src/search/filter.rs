//! Client-side filter engine.

use crate::catalog::Product;
use crate::search::FilterCriteria;
use serde::{Deserialize, Serialize};

/// Where filter criteria are evaluated.
///
/// A storefront runs in exactly one mode. In `Server` mode the criteria are
/// sent as query parameters and the returned products are shown as is; the
/// local predicate is never applied on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Filter the in-memory catalog with [`filter_products`].
    Local,
    /// Let the catalog service filter via [`query_pairs`](crate::search::query_pairs).
    Server,
}

/// Products satisfying every criterion, in catalog order.
pub fn filter_products<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    products.iter().filter(|p| criteria.matches(p)).collect()
}
