//! Product and condition types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image shown for products whose source record carries none.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=1200&auto=format&fit=crop";

/// Sale condition of a handset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    /// Sealed, never used.
    New,
    /// Restored and tested by the shop.
    Refurbished,
    /// Second-hand, sold as is.
    Used,
}

impl Condition {
    /// Every condition, in display order.
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Refurbished, Condition::Used];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Refurbished => "Refurbished",
            Condition::Used => "Used",
        }
    }
}

impl FromStr for Condition {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "refurbished" => Ok(Condition::Refurbished),
            "used" => Ok(Condition::Used),
            _ => Err(CommerceError::InvalidCondition(s.to_string())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phone listed in the catalog.
///
/// Products are immutable snapshots: the catalog replaces them wholesale on
/// every load, and the cart keeps its own copy taken at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Model name shown on the card (e.g., "iPhone 12 128GB").
    pub name: String,
    /// Manufacturer.
    pub brand: String,
    /// Sale condition; `None` when the catalog sent none we recognize.
    pub condition: Option<Condition>,
    /// Selling price.
    pub price: Money,
    /// List price, shown struck through when present.
    pub mrp: Option<Money>,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a product with no list price and the default image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        condition: Condition,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            condition: Some(condition),
            price,
            mrp: None,
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
        }
    }

    /// Set the list price.
    pub fn with_mrp(mut self, mrp: Money) -> Self {
        self.mrp = Some(mrp);
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Amount saved against the list price, if the list price is higher.
    pub fn savings(&self) -> Option<Money> {
        self.mrp
            .and_then(|mrp| mrp.try_subtract(&self.price))
            .filter(|saved| !saved.is_zero())
    }

    /// Whole-percent discount against the list price, rounded down.
    pub fn discount_percent(&self) -> Option<u8> {
        let saved = self.savings()?;
        let mrp = self.mrp?;
        let percent = u128::from(saved.amount()) * 100 / u128::from(mrp.amount());
        u8::try_from(percent).ok()
    }
}
