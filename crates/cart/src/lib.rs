//! cartkit - Shopping cart view-model derivation.
//!
//! Turns a backend cart into a per-line view model (quantities, unit price,
//! line totals, running cart total) and keeps that model consistent across
//! local increment, decrement and delete edits until the shopper commits.
//!
//! # Architecture
//!
//! - [`model`] - Pure derivation and mutation logic; no I/O
//! - [`session`] - View-owned lifecycle: replace on new cart, edit, commit
//! - [`save`] - The single "save cart" contract reaching the backend
//! - [`shopify`] - Storefront API cart shapes and conversions
//!
//! Rendering, routing and transport are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use cartkit::{CartSession, RawCart, RawLineItem, RecordingSaver};
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .build()
//! #     .unwrap()
//! #     .block_on(async {
//! let mut session = CartSession::default();
//! session
//!     .replace_cart(&RawCart::new(
//!         vec![RawLineItem::new("A", 2, "Shirt", "vA", "10")],
//!         "20",
//!     ))
//!     .unwrap();
//!
//! session.increment("A").unwrap();
//! assert!(session.show_update_action());
//!
//! let saver = RecordingSaver::new();
//! let payload = session.update_cart(&saver).await.unwrap();
//! assert_eq!(payload.lines()[0].quantity, 3);
//! # });
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod model;
pub mod raw;
pub mod save;
pub mod session;
pub mod shopify;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result, ValidationError};
pub use model::{
    CartLineView, CartState, CommitPayload, LineQuantityUpdate, QuantityChange, QuantityPolicy,
};
pub use raw::{ProductImage, RawCart, RawLineItem, RawVariant};
pub use save::{CartSaver, RecordingSaver, SaveError};
pub use session::CartSession;
