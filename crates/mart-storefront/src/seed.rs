//! Built-in inventory for static catalog mode.

use mart_commerce::catalog::{Condition, Product};
use mart_commerce::Money;

/// The shop's standing inventory, in shelf order.
pub fn inventory() -> Vec<Product> {
    vec![
        Product::new(
            "iphone-12-128-new",
            "iPhone 12 (128GB)",
            "Apple",
            Condition::New,
            Money::new(35_999),
        )
        .with_mrp(Money::new(49_900))
        .with_image("https://images.unsplash.com/photo-1605236453806-6ff36851218e?w=1200&auto=format&fit=crop"),
        Product::new(
            "galaxy-s21-fe-used",
            "Galaxy S21 FE 5G",
            "Samsung",
            Condition::Used,
            Money::new(24_999),
        ),
        Product::new(
            "iphone-11-64-refurb",
            "iPhone 11 (64GB)",
            "Apple",
            Condition::Refurbished,
            Money::new(22_499),
        )
        .with_mrp(Money::new(29_999)),
        Product::new(
            "pixel-7-refurb",
            "Pixel 7",
            "Google",
            Condition::Refurbished,
            Money::new(31_500),
        )
        .with_mrp(Money::new(41_999)),
        Product::new(
            "oneplus-11r-new",
            "OnePlus 11R 5G",
            "OnePlus",
            Condition::New,
            Money::new(39_999),
        ),
        Product::new(
            "redmi-note-12-new",
            "Redmi Note 12",
            "Xiaomi",
            Condition::New,
            Money::new(14_999),
        )
        .with_mrp(Money::new(17_999)),
        Product::new(
            "galaxy-s23-ultra-new",
            "Galaxy S23 Ultra",
            "Samsung",
            Condition::New,
            Money::new(89_999),
        )
        .with_mrp(Money::new(124_999)),
        Product::new(
            "iphone-xr-used",
            "iPhone XR (64GB)",
            "Apple",
            Condition::Used,
            Money::new(11_999),
        ),
    ]
}
