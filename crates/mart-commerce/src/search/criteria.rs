//! Filter criteria.

use crate::catalog::{Condition, Product};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label of the catch-all option in the category and brand selectors.
pub const ALL_OPTION: &str = "All";

/// Lowest selectable max price.
pub const MIN_PRICE_BOUND: Money = Money::new(5_000);

/// Top of the max price slider. Selecting it removes the price cap.
pub const MAX_PRICE_BOUND: Money = Money::new(100_000);

/// Increment of the max price slider.
pub const PRICE_STEP: u64 = 1_000;

/// Category selector: every condition, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Condition),
}

impl CategoryFilter {
    /// Options in the order the selector shows them.
    pub fn options() -> [CategoryFilter; 4] {
        [
            CategoryFilter::All,
            CategoryFilter::Only(Condition::New),
            CategoryFilter::Only(Condition::Refurbished),
            CategoryFilter::Only(Condition::Used),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_OPTION,
            CategoryFilter::Only(condition) => condition.as_str(),
        }
    }

    /// The condition this filter restricts to, if any.
    pub fn condition(&self) -> Option<Condition> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(condition) => Some(*condition),
        }
    }

    /// Products without a known condition only match `All`.
    pub fn matches(&self, condition: Option<Condition>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => condition == Some(*wanted),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_OPTION) {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Brand selector: every brand, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrandFilter {
    #[default]
    All,
    Only(String),
}

impl BrandFilter {
    /// Build from a selector value; `"All"` selects every brand.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_OPTION {
            BrandFilter::All
        } else {
            BrandFilter::Only(label)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BrandFilter::All => ALL_OPTION,
            BrandFilter::Only(brand) => brand,
        }
    }

    pub fn matches(&self, brand: &str) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Only(wanted) => wanted == brand,
        }
    }

    /// Check the selection against the brand options currently on offer.
    pub fn validate(&self, options: &[String]) -> Result<(), CommerceError> {
        match self {
            BrandFilter::All => Ok(()),
            BrandFilter::Only(brand) if options.iter().any(|o| o == brand) => Ok(()),
            BrandFilter::Only(brand) => Err(CommerceError::UnknownBrand(brand.clone())),
        }
    }
}

impl fmt::Display for BrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four independent filter inputs; a product must satisfy all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Condition restriction.
    pub category: CategoryFilter,
    /// Brand restriction.
    pub brand: BrandFilter,
    /// Inclusive upper bound on price; `None` means no cap.
    pub max_price: Option<Money>,
    /// Free-text query matched against product names.
    pub query: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            brand: BrandFilter::All,
            max_price: None,
            query: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Criteria with every filter at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: BrandFilter) -> Self {
        self.brand = brand;
        self
    }

    /// Set the max price; see [`FilterCriteria::set_max_price`].
    pub fn with_max_price(mut self, max_price: Money) -> Self {
        self.set_max_price(max_price);
        self
    }

    /// Set the text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_brand(&mut self, brand: BrandFilter) {
        self.brand = brand;
    }

    /// Set the max price.
    ///
    /// Values below `MIN_PRICE_BOUND` are raised to it. `MAX_PRICE_BOUND` and
    /// above clear the cap, so the top of the slider shows every phone.
    pub fn set_max_price(&mut self, max_price: Money) {
        self.max_price = if max_price >= MAX_PRICE_BOUND {
            None
        } else {
            Some(max_price.max(MIN_PRICE_BOUND))
        };
    }

    /// Remove the price cap.
    pub fn clear_max_price(&mut self) {
        self.max_price = None;
    }

    /// Slider position for the current cap.
    pub fn price_slider_value(&self) -> Money {
        self.max_price.unwrap_or(MAX_PRICE_BOUND)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The query with surrounding whitespace removed.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// Check if no filter narrows the catalog beyond the defaults.
    pub fn is_default(&self) -> bool {
        self.category == CategoryFilter::All
            && self.brand == BrandFilter::All
            && self.max_price.is_none()
            && self.trimmed_query().is_empty()
    }

    /// Check a product against all four criteria.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.condition)
            && self.brand.matches(&product.brand)
            && self.max_price.map_or(true, |cap| product.price <= cap)
            && self.matches_text(&product.name)
    }

    fn matches_text(&self, name: &str) -> bool {
        let query = self.trimmed_query();
        query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(name: &str, brand: &str, condition: Condition, price: u64) -> Product {
        Product::new(name, name, brand, condition, Money::new(price))
    }

    #[test]
    fn test_defaults() {
        let criteria = FilterCriteria::new();
        assert_eq!(criteria.category, CategoryFilter::All);
        assert_eq!(criteria.brand, BrandFilter::All);
        assert_eq!(criteria.max_price, None);
        assert_eq!(criteria.price_slider_value(), MAX_PRICE_BOUND);
        assert!(criteria.is_default());
    }

    #[test]
    fn test_blank_query_is_still_default() {
        assert!(FilterCriteria::new().with_query("   ").is_default());
        assert!(!FilterCriteria::new().with_query("pixel").is_default());
    }

    #[test]
    fn test_max_price_is_clamped() {
        let low = FilterCriteria::new().with_max_price(Money::new(10));
        assert_eq!(low.max_price, Some(MIN_PRICE_BOUND));

        let mid = FilterCriteria::new().with_max_price(Money::new(42_000));
        assert_eq!(mid.max_price, Some(Money::new(42_000)));
        assert!(!mid.is_default());
    }

    #[test]
    fn test_top_of_slider_clears_cap() {
        let top = FilterCriteria::new().with_max_price(MAX_PRICE_BOUND);
        assert_eq!(top.max_price, None);
        assert!(top.is_default());

        let mut above = FilterCriteria::new().with_max_price(Money::new(20_000));
        above.set_max_price(Money::new(1_000_000));
        assert_eq!(above.max_price, None);

        let mut cleared = FilterCriteria::new().with_max_price(Money::new(20_000));
        cleared.clear_max_price();
        assert_eq!(cleared, FilterCriteria::default());
    }

    #[test]
    fn test_default_criteria_has_no_price_cap() {
        let flagship = phone("Galaxy S23 Ultra", "Samsung", Condition::New, 89_999);
        let beyond_slider = phone("Galaxy Z Fold5", "Samsung", Condition::New, 154_999);

        assert!(FilterCriteria::new().matches(&flagship));
        assert!(FilterCriteria::new().matches(&beyond_slider));
        assert!(!FilterCriteria::new()
            .with_max_price(Money::new(60_000))
            .matches(&flagship));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Used".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Condition::Used))
        );
        assert!("Open box".parse::<CategoryFilter>().is_err());

        let labels: Vec<&str> = CategoryFilter::options().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["All", "New", "Refurbished", "Used"]);
    }

    #[test]
    fn test_brand_label_round_trip() {
        assert_eq!(BrandFilter::from_label("All"), BrandFilter::All);
        assert_eq!(
            BrandFilter::from_label("Apple"),
            BrandFilter::Only("Apple".to_string())
        );
        assert_eq!(BrandFilter::Only("OnePlus".into()).to_string(), "OnePlus");
    }

    #[test]
    fn test_brand_validation() {
        let options = vec!["All".to_string(), "Apple".to_string()];
        assert!(BrandFilter::All.validate(&options).is_ok());
        assert!(BrandFilter::from_label("Apple").validate(&options).is_ok());
        assert_eq!(
            BrandFilter::from_label("Nokia").validate(&options),
            Err(CommerceError::UnknownBrand("Nokia".to_string()))
        );
    }

    #[test]
    fn test_unknown_condition_only_matches_all() {
        let mut unlabeled = phone("Nokia 3310", "Nokia", Condition::New, 2_999);
        unlabeled.condition = None;

        assert!(FilterCriteria::new().matches(&unlabeled));
        for condition in Condition::ALL {
            assert!(!FilterCriteria::new()
                .with_category(CategoryFilter::Only(condition))
                .matches(&unlabeled));
        }
    }

    #[test]
    fn test_matches_each_criterion() {
        let iphone = phone("iPhone 12", "Apple", Condition::New, 35_999);

        assert!(FilterCriteria::new().matches(&iphone));
        assert!(!FilterCriteria::new()
            .with_category(CategoryFilter::Only(Condition::Used))
            .matches(&iphone));
        assert!(!FilterCriteria::new()
            .with_brand(BrandFilter::from_label("Samsung"))
            .matches(&iphone));
        assert!(!FilterCriteria::new()
            .with_max_price(Money::new(30_000))
            .matches(&iphone));
        assert!(!FilterCriteria::new().with_query("galaxy").matches(&iphone));
    }

    #[test]
    fn test_price_bound_is_inclusive() {
        let exact = phone("Pixel 7", "Google", Condition::Refurbished, 60_000);
        let criteria = FilterCriteria::new().with_max_price(Money::new(60_000));
        assert!(criteria.matches(&exact));
    }

    #[test]
    fn test_text_match_is_trimmed_and_case_insensitive() {
        let iphone = phone("iPhone 12 Pro", "Apple", Condition::New, 35_999);
        assert!(FilterCriteria::new().with_query("  IPHONE 12 ").matches(&iphone));
        assert!(FilterCriteria::new().with_query("pro").matches(&iphone));
        assert!(!FilterCriteria::new().with_query("apple").matches(&iphone));
    }
}
