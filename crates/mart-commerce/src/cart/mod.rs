//! Shopping cart module.
//!
//! Contains the cart, its lines, and the summary used by cart panels.

mod cart;
mod summary;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
pub use summary::{CartSummary, LineSummary};
