//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, cart and filter operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity would exceed the per-line ceiling.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u64, u64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// A condition label that is not New, Refurbished or Used.
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// A brand that is not part of the current brand universe.
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),
}
