//! Raw cart shapes as delivered by the commerce backend.
//!
//! These mirror the JSON the backend hands to the view (`lineItems`,
//! `totalPrice`, string-encoded decimal prices). They are inputs only; the
//! cart model never mutates them.

use cartkit_core::{CartId, LineItemId, VariantId};
use serde::{Deserialize, Serialize};

/// A cart as supplied by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
    /// Backend cart ID, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    /// Line items in display order.
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    /// Cart total as a decimal string.
    pub total_price: String,
}

/// One product variant entry in a raw cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLineItem {
    /// Line item ID.
    pub id: LineItemId,
    /// Quantity in the cart.
    pub quantity: i64,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Purchased variant.
    pub variant: RawVariant,
}

/// The purchasable variant behind a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Unit price as a decimal string.
    #[serde(default)]
    pub price: Option<String>,
    /// Variant image.
    #[serde(default)]
    pub image: Option<ProductImage>,
}

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Image URL.
    pub src: String,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl RawCart {
    /// Create a cart from line items and a total.
    #[must_use]
    pub fn new(line_items: Vec<RawLineItem>, total_price: impl Into<String>) -> Self {
        Self {
            id: None,
            line_items,
            total_price: total_price.into(),
        }
    }

    /// Parse a cart from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if the document does not match the shape.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether the backend cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

impl RawLineItem {
    /// Create a line item with a priced variant and no image.
    #[must_use]
    pub fn new(
        id: impl Into<LineItemId>,
        quantity: i64,
        title: impl Into<String>,
        variant_id: impl Into<VariantId>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            quantity,
            title: title.into(),
            variant: RawVariant {
                id: variant_id.into(),
                price: Some(price.into()),
                image: None,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_wire_shape() {
        let cart = RawCart::from_json(
            r#"{
                "lineItems": [
                    {
                        "id": "A",
                        "quantity": 2,
                        "title": "Shirt",
                        "variant": {
                            "id": "vA",
                            "price": "10.00",
                            "image": { "src": "https://cdn.example/a.png", "altText": "A" }
                        }
                    }
                ],
                "totalPrice": "20.00"
            }"#,
        )
        .unwrap();

        assert_eq!(cart.id, None);
        assert_eq!(cart.total_price, "20.00");
        let item = &cart.line_items[0];
        assert_eq!(item.id.as_str(), "A");
        assert_eq!(item.variant.price.as_deref(), Some("10.00"));
        assert_eq!(
            item.variant.image.as_ref().unwrap().alt_text.as_deref(),
            Some("A")
        );
    }

    #[test]
    fn test_missing_price_deserializes_as_none() {
        let cart = RawCart::from_json(
            r#"{"lineItems":[{"id":"A","quantity":1,"title":"x","variant":{"id":"vA"}}],"totalPrice":"0"}"#,
        )
        .unwrap();
        assert_eq!(cart.line_items[0].variant.price, None);
    }

    #[test]
    fn test_missing_line_items_is_empty() {
        let cart = RawCart::from_json(r#"{"totalPrice":"0"}"#).unwrap();
        assert!(cart.is_empty());
    }
}
