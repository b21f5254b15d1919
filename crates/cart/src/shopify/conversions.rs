//! Conversions between Shopify cart types and the cart model.

use cartkit_core::{CartId, LineItemId, VariantId};

use super::types::{Cart, CartLine, CartLineUpdateInput, Image};
use crate::model::CommitPayload;
use crate::raw::{ProductImage, RawCart, RawLineItem, RawVariant};

fn convert_image(image: &Image) -> ProductImage {
    ProductImage {
        src: image.url.clone(),
        alt_text: image.alt_text.clone(),
    }
}

impl From<&CartLine> for RawLineItem {
    fn from(line: &CartLine) -> Self {
        let merchandise = &line.merchandise;
        // Fall back to the product image when the variant has none.
        let image = merchandise
            .image
            .as_ref()
            .or(merchandise.product.featured_image.as_ref())
            .map(convert_image);

        Self {
            id: LineItemId::new(line.id.as_str()),
            quantity: line.quantity,
            title: merchandise.product.title.clone(),
            variant: RawVariant {
                id: VariantId::new(merchandise.id.as_str()),
                price: Some(merchandise.price.amount.clone()),
                image,
            },
        }
    }
}

impl From<&Cart> for RawCart {
    fn from(cart: &Cart) -> Self {
        Self {
            id: Some(CartId::new(cart.id.as_str())),
            line_items: cart.lines.iter().map(RawLineItem::from).collect(),
            total_price: cart.cost.total.amount.clone(),
        }
    }
}

impl CommitPayload {
    /// Convert to `cartLinesUpdate` mutation input.
    ///
    /// Zero quantities are passed through; Shopify removes such lines.
    #[must_use]
    pub fn to_line_updates(&self) -> Vec<CartLineUpdateInput> {
        self.iter()
            .map(|update| CartLineUpdateInput {
                id: update.id.to_string(),
                quantity: update.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartkit_core::Price;

    use super::*;
    use crate::CartState;

    const SHOPIFY_CART: &str = r#"{
        "id": "gid://shopify/Cart/c1",
        "checkout_url": "https://shop.example/checkout/c1",
        "total_quantity": 3,
        "cost": {
            "subtotal_amount": { "amount": "25.0", "currency_code": "USD" },
            "total_amount": { "amount": "25.0", "currency_code": "USD" }
        },
        "lines": [
            {
                "id": "gid://shopify/CartLine/A",
                "quantity": 2,
                "cost": {
                    "amount_per_quantity": { "amount": "10.0", "currency_code": "USD" },
                    "total_amount": { "amount": "20.0", "currency_code": "USD" }
                },
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/vA",
                    "title": "Large",
                    "price": { "amount": "10.0", "currency_code": "USD" },
                    "image": { "url": "https://cdn.example/a.png", "alt_text": "Shirt" },
                    "product": { "id": "p1", "handle": "shirt", "title": "Shirt" }
                }
            },
            {
                "id": "gid://shopify/CartLine/B",
                "quantity": 1,
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/vB",
                    "price": { "amount": "5.0" },
                    "product": {
                        "title": "Socks",
                        "featured_image": { "url": "https://cdn.example/socks.png" }
                    }
                }
            }
        ]
    }"#;

    fn shopify_cart() -> Cart {
        serde_json::from_str(SHOPIFY_CART).unwrap()
    }

    #[test]
    fn test_cart_to_raw_cart() {
        let raw = RawCart::from(&shopify_cart());

        assert_eq!(raw.id.as_ref().unwrap().as_str(), "gid://shopify/Cart/c1");
        assert_eq!(raw.total_price, "25.0");
        assert_eq!(raw.line_items.len(), 2);

        let a = &raw.line_items[0];
        assert_eq!(a.id.as_str(), "gid://shopify/CartLine/A");
        assert_eq!(a.title, "Shirt");
        assert_eq!(a.variant.price.as_deref(), Some("10.0"));
        assert_eq!(a.variant.image.as_ref().unwrap().src, "https://cdn.example/a.png");
    }

    #[test]
    fn test_minimal_cart_deserializes() {
        let cart: Cart = serde_json::from_str(
            r#"{ "id": "c", "cost": { "total_amount": { "amount": "0.0" } }, "lines": [] }"#,
        )
        .unwrap();
        let raw = RawCart::from(&cart);
        assert!(raw.is_empty());
        assert_eq!(raw.total_price, "0.0");
    }

    #[test]
    fn test_product_image_fallback() {
        let raw = RawCart::from(&shopify_cart());
        let b = &raw.line_items[1];
        assert_eq!(
            b.variant.image.as_ref().unwrap().src,
            "https://cdn.example/socks.png"
        );
    }

    #[test]
    fn test_shopify_cart_normalizes() {
        let state = CartState::try_from(&RawCart::from(&shopify_cart())).unwrap();
        assert_eq!(state.total_quantity(), 3);
        assert_eq!(state.total_price(), Price::new(25));
        assert_eq!(
            state.line("gid://shopify/CartLine/A").unwrap().product_total_price(),
            Price::new(20)
        );
    }

    #[test]
    fn test_commit_to_line_updates() {
        let mut state = CartState::try_from(&RawCart::from(&shopify_cart())).unwrap();
        state.delete_line("gid://shopify/CartLine/B").unwrap();

        let updates = state.commit().to_line_updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].id, "gid://shopify/CartLine/A");
        assert_eq!(updates[0].quantity, 2);
        assert_eq!(updates[1].quantity, 0);

        let json = serde_json::to_value(&updates[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "gid://shopify/CartLine/B", "quantity": 0 })
        );
    }
}
