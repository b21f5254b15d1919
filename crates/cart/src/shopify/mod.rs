//! Shopify Storefront API cart shapes.
//!
//! Shopify is the commerce backend this crate is usually paired with. The
//! types here let a caller feed a Storefront API cart straight into the cart
//! model and turn a commit into `cartLinesUpdate` input. Transport is left to
//! the caller's [`CartSaver`](crate::CartSaver) implementation.

mod conversions;
pub mod types;

pub use types::*;
