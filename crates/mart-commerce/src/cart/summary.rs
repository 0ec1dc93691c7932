//! Cart summary for display.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Breakdown of the cart as rendered in the cart panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Sum of all line subtotals.
    pub total: Money,
    /// Sum of all quantities.
    pub item_count: u64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineSummary>,
}

impl CartSummary {
    /// Check if the summary has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Badge text; `None` when there is nothing to show.
    pub fn badge(&self) -> Option<String> {
        (self.item_count > 0).then(|| self.item_count.to_string())
    }
}

/// A single line of the cart summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Unit price times quantity.
    pub subtotal: Money,
}
