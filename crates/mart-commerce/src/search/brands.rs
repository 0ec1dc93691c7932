//! Brand universe derived from the catalog.

use crate::catalog::Product;
use crate::search::criteria::ALL_OPTION;
use std::collections::BTreeSet;

/// Brand selector options: `"All"` followed by the distinct brands present
/// in `products`, sorted.
///
/// Empty brand strings are left out, and `"All"` appears once even if a
/// product carries it as a brand.
pub fn brand_options(products: &[Product]) -> Vec<String> {
    let brands: BTreeSet<&str> = products
        .iter()
        .map(|p| p.brand.as_str())
        .filter(|b| !b.is_empty() && *b != ALL_OPTION)
        .collect();

    std::iter::once(ALL_OPTION)
        .chain(brands)
        .map(str::to_string)
        .collect()
}
