//! Cart and cart line types.

use crate::cart::{CartSummary, LineSummary};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// A shopping cart.
///
/// Holds at most one line per product id, in the order products were first
/// added. Every line has a quantity of at least 1: decrementing a single
/// unit removes the line instead of keeping it at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for `product.id`, or inserts a new line
    /// with quantity 1 holding a snapshot of `product`. Returns the line's new
    /// quantity.
    pub fn add(&mut self, product: &Product) -> Result<u32, CommerceError> {
        if let Some(line) = self.line_mut(&product.id) {
            return line.bump();
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        Ok(1)
    }

    /// Add one unit to an existing line.
    ///
    /// Returns `Ok(false)` without touching the cart if no line exists.
    pub fn increment(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        match self.line_mut(id) {
            Some(line) => line.bump().map(|_| true),
            None => Ok(false),
        }
    }

    /// Remove one unit from a line.
    ///
    /// A line at quantity 1 is removed entirely. Returns whether a line was
    /// found.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }
        true
    }

    /// Remove a line regardless of its quantity.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| &line.product.id != id);
        self.lines.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.lines.iter().try_fold(Money::zero(), |acc, line| {
            acc.try_add(&line.subtotal()?).ok_or(CommerceError::Overflow)
        })
    }

    /// Total number of units (sum of quantities), as shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    /// Quantity of a product in the cart, zero if absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map(|line| line.quantity).unwrap_or(0)
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Build the per-line breakdown shown in the cart panel.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                Ok(LineSummary {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    unit_price: line.product.price,
                    quantity: line.quantity,
                    subtotal: line.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartSummary {
            total: self.total()?,
            item_count: self.item_count(),
            lines,
        })
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.product.id == id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.product.id == id)
    }
}

/// One product and its quantity within the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product as it was when first added.
    pub product: Product,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(u64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }

    fn bump(&mut self) -> Result<u32, CommerceError> {
        let next = self.quantity + 1;
        if next > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                u64::from(next),
                u64::from(MAX_QUANTITY_PER_LINE),
            ));
        }
        self.quantity = next;
        Ok(next)
    }
}
