//! Newtype IDs for type-safe entity references.
//!
//! Commerce backends hand out opaque string identifiers (Shopify uses
//! `gid://shopify/CartLine/...` style global IDs). Use the `define_id!` macro
//! to create type-safe wrappers that prevent accidentally mixing IDs from
//! different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `AsRef<str>` and `Borrow<str>`
///
/// `Borrow<str>` lets maps keyed by the ID be queried with a plain `&str`.
///
/// # Example
///
/// ```rust
/// # use cartkit_core::define_id;
/// define_id!(LineId);
/// define_id!(SkuId);
///
/// let line = LineId::new("A");
/// let sku = SkuId::new("A");
///
/// // These are different types, so this won't compile:
/// // let _: LineId = sku;
/// assert_eq!(line.as_str(), sku.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CartId);
define_id!(LineItemId);
define_id!(VariantId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        let id = LineItemId::new("gid://shopify/CartLine/1");
        assert_eq!(id.to_string(), "gid://shopify/CartLine/1");
    }

    #[test]
    fn test_conversions() {
        let from_str: VariantId = "vA".into();
        let from_string = VariantId::from("vA".to_string());
        assert_eq!(from_str, from_string);
        assert_eq!(String::from(from_str), "vA");
        assert_eq!(from_string.into_inner(), "vA");
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(LineItemId::new("A"), 2);
        assert_eq!(map.get("A"), Some(&2));
    }

    #[test]
    fn test_serde_transparent() {
        let id = CartId::new("cart-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cart-1\"");

        let parsed: CartId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
