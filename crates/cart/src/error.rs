//! Cart error types.
//!
//! All errors are local and synchronous except [`CartError::Save`], which
//! wraps whatever the external save collaborator reported.

use cartkit_core::{LineItemId, PriceError};
use thiserror::Error;

use crate::save::SaveError;

/// Errors raised by cart normalization, edits, and commits.
#[derive(Debug, Error)]
pub enum CartError {
    /// The raw cart is malformed; the whole cart was rejected.
    #[error("Invalid cart: {0}")]
    Validation(#[from] ValidationError),

    /// An edit referenced a line item that is not in the cart.
    #[error("Line item not found: {0}")]
    NotFound(LineItemId),

    /// An edit would break a cart invariant (e.g. a negative quantity under
    /// the strict quantity policy).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// An edit would overflow a quantity or amount.
    #[error("Arithmetic overflow on line item {0}")]
    Overflow(LineItemId),

    /// An operation needed a cart but none has been loaded yet.
    #[error("No cart loaded")]
    NoCart,

    /// The save collaborator rejected the commit payload.
    #[error("Save failed: {0}")]
    Save(#[from] SaveError),
}

/// Reasons a raw cart is rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A line item has no `variant.price`.
    #[error("line item {line_item_id} has no variant price")]
    MissingPrice {
        /// Offending line item.
        line_item_id: LineItemId,
    },

    /// A line item's price could not be parsed.
    #[error("line item {line_item_id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending line item.
        line_item_id: LineItemId,
        /// Underlying parse failure.
        #[source]
        source: PriceError,
    },

    /// The cart-level total could not be parsed.
    #[error("cart total price is invalid: {0}")]
    InvalidTotalPrice(#[source] PriceError),

    /// A line item carries a negative quantity.
    #[error("line item {line_item_id} has negative quantity {quantity}")]
    NegativeQuantity {
        /// Offending line item.
        line_item_id: LineItemId,
        /// The quantity received.
        quantity: i64,
    },

    /// The same line item id occurs more than once.
    #[error("line item {0} appears more than once")]
    DuplicateLineItem(LineItemId),

    /// `quantity * price` or the running quantity overflowed.
    #[error("line item {0} totals overflow")]
    Overflow(LineItemId),
}

/// Result type alias for [`CartError`].
pub type Result<T> = std::result::Result<T, CartError>;
