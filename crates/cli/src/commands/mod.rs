//! CLI subcommands.

pub mod edit;
pub mod show;

use std::path::Path;

use cartkit::{CartError, RawCart, shopify};
use clap::ValueEnum;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The cart document is not valid JSON for the chosen format.
    #[error("Invalid cart document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart model rejected the cart or an edit.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Shape of the input cart document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `{ "lineItems": [...], "totalPrice": "..." }`
    Raw,
    /// Shopify Storefront API cart
    Shopify,
}

/// Parse a cart document in the given format.
pub fn parse_cart(json: &str, format: InputFormat) -> Result<RawCart, CommandError> {
    match format {
        InputFormat::Raw => Ok(RawCart::from_json(json)?),
        InputFormat::Shopify => {
            let cart: shopify::Cart = serde_json::from_str(json)?;
            Ok(RawCart::from(&cart))
        }
    }
}

/// Read and parse a cart file.
pub fn load_cart(path: &Path, format: InputFormat) -> Result<RawCart, CommandError> {
    let json = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, "Loaded cart document");
    parse_cart(&json, format)
}
