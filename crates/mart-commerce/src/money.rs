//! Money type for representing prices.
//!
//! The storefront trades in whole rupees: catalog prices carry no minor
//! unit, so amounts are plain non-negative integers. Arithmetic is checked
//! and reports overflow instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "\u{20b9}";

/// A non-negative amount in whole display-currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Create a new amount.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add another amount, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract another amount, returning None if the result would be negative.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: u64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Sum amounts, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }

    /// Format with the currency symbol (e.g., "₹35,999").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format the amount with Indian digit grouping (e.g., "1,00,000").
    ///
    /// The last three digits form one group; everything before them is
    /// grouped in pairs.
    pub fn display_amount(&self) -> String {
        let digits = self.0.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Money(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
