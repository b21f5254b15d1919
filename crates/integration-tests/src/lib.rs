//! Integration tests for cartkit.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartkit-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end edit sessions against fixed carts
//! - `cart_properties` - Property tests over generated carts and edit sequences
//!
//! This library holds the shared fixtures.

use cartkit::{RawCart, RawLineItem};

/// The two-line cart used across scenario tests: `A` (2 x 10) and `B` (1 x 5),
/// total 25.
#[must_use]
pub fn two_line_cart() -> RawCart {
    RawCart::new(
        vec![
            RawLineItem::new("A", 2, "Shirt", "vA", "10"),
            RawLineItem::new("B", 1, "Socks", "vB", "5"),
        ],
        "25",
    )
}

/// Build a raw cart from `(quantity, price)` pairs, with line IDs `L0`, `L1`,
/// ... and a total equal to the sum of line totals.
#[must_use]
pub fn cart_from_lines(lines: &[(i64, i64)]) -> RawCart {
    let items = lines
        .iter()
        .enumerate()
        .map(|(i, (quantity, price))| {
            RawLineItem::new(
                format!("L{i}"),
                *quantity,
                format!("Product {i}"),
                format!("V{i}"),
                price.to_string(),
            )
        })
        .collect();
    let total: i64 = lines.iter().map(|(q, p)| q * p).sum();
    RawCart::new(items, total.to_string())
}
