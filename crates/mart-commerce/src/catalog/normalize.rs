//! Normalization of raw catalog records.
//!
//! The catalog service returns loosely shaped JSON: ids may live under `id`,
//! `_id` or `_id.$oid`, prices may arrive as numbers or strings, and images
//! may be a single field or a list. Everything is coerced into [`Product`]
//! here so the rest of the storefront only sees well-formed records.
//! Every object in the response becomes a product.

use crate::catalog::product::{Condition, Product, DEFAULT_PRODUCT_IMAGE};
use crate::ids::ProductId;
use crate::money::Money;
use serde_json::{Map, Value};

/// Normalize a catalog response body into products.
///
/// Anything other than a JSON array yields an empty catalog. Array entries
/// that are not objects are skipped.
pub fn normalize_catalog(body: &Value) -> Vec<Product> {
    let Some(records) = body.as_array() else {
        tracing::debug!("catalog response is not an array; treating as empty");
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.as_object() {
            Some(fields) => Some(normalize_record(fields)),
            None => {
                tracing::warn!(index, "skipping catalog entry that is not an object");
                None
            }
        })
        .collect()
}

/// Normalize a single record.
///
/// A missing or unrecognized condition leaves `condition` unset; such
/// products only show when the category filter is `All`.
pub fn normalize_record(fields: &Map<String, Value>) -> Product {
    let id = record_id(fields);

    let condition = match fields.get("condition").and_then(Value::as_str) {
        Some(label) => match label.parse::<Condition>() {
            Ok(condition) => Some(condition),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "product has an unknown condition");
                None
            }
        },
        None => {
            tracing::debug!(id = %id, "product has no condition");
            None
        }
    };

    Product {
        name: string_field(fields, "name"),
        brand: string_field(fields, "brand"),
        condition,
        price: fields.get("price").and_then(coerce_amount).unwrap_or_default(),
        mrp: fields
            .get("mrp")
            .and_then(coerce_amount)
            .filter(|mrp| !mrp.is_zero()),
        image: image_url(fields),
        id,
    }
}

/// First present of `id`, `_id`, `_id.$oid`; otherwise a fresh id.
fn record_id(fields: &Map<String, Value>) -> ProductId {
    let nested_oid = fields
        .get("_id")
        .and_then(|v| v.get("$oid"))
        .and_then(scalar_id);

    fields
        .get("id")
        .and_then(scalar_id)
        .or_else(|| fields.get("_id").and_then(scalar_id))
        .or(nested_oid)
        .map(ProductId::new)
        .unwrap_or_else(ProductId::generate)
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Coerce a number or numeric string into an amount.
///
/// Fractions are rounded; negative, non-finite and unparseable values
/// yield `None`.
fn coerce_amount(value: &Value) -> Option<Money> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !amount.is_finite() || amount < 0.0 || amount > u64::MAX as f64 {
        return None;
    }
    Some(Money::new(amount.round() as u64))
}

fn image_url(fields: &Map<String, Value>) -> String {
    let primary = fields
        .get("image")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let first_listed = || {
        fields
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    primary
        .or_else(first_listed)
        .unwrap_or(DEFAULT_PRODUCT_IMAGE)
        .to_string()
}
