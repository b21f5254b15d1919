//! cartkit core - Shared value types.
//!
//! This crate provides the small value types used across all cartkit
//! components:
//! - `cart` - Cart view-model derivation and edit session
//! - `cli` - Command-line driver for inspecting and editing carts
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no logging, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and integer prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
