//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_MINOR_UNIT_DIGITS` - Fractional price digits kept as integer minor
//!   units, 0-4 (default: 0, whole units with the fraction truncated)
//! - `CART_STRICT_QUANTITY` - Reject decrements below zero instead of
//!   allowing negative quantities (default: false)

use cartkit_core::PriceScale;
use thiserror::Error;

use crate::model::QuantityPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart model configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartConfig {
    /// Unit that integer prices are counted in
    pub price_scale: PriceScale,
    /// Handling of decrements below zero
    pub quantity_policy: QuantityPolicy,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let digits = lookup("CART_MINOR_UNIT_DIGITS")
            .map(|value| {
                value.trim().parse::<u32>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CART_MINOR_UNIT_DIGITS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(0);
        let price_scale = PriceScale::new(digits).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_MINOR_UNIT_DIGITS".to_string(), e.to_string())
        })?;

        let strict = lookup("CART_STRICT_QUANTITY")
            .map(|value| parse_bool("CART_STRICT_QUANTITY", &value))
            .transpose()?
            .unwrap_or(false);
        let quantity_policy = if strict {
            QuantityPolicy::Strict
        } else {
            QuantityPolicy::Permissive
        };

        Ok(Self {
            price_scale,
            quantity_policy,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.price_scale, PriceScale::WHOLE);
        assert_eq!(config.quantity_policy, QuantityPolicy::Permissive);
    }

    #[test]
    fn test_minor_unit_digits() {
        let config = CartConfig::from_lookup(lookup(&[("CART_MINOR_UNIT_DIGITS", "2")])).unwrap();
        assert_eq!(config.price_scale.minor_unit_digits(), 2);
    }

    #[test]
    fn test_minor_unit_digits_out_of_range() {
        let result = CartConfig::from_lookup(lookup(&[("CART_MINOR_UNIT_DIGITS", "9")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "CART_MINOR_UNIT_DIGITS"));
    }

    #[test]
    fn test_minor_unit_digits_not_a_number() {
        let result = CartConfig::from_lookup(lookup(&[("CART_MINOR_UNIT_DIGITS", "two")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_quantity() {
        let config = CartConfig::from_lookup(lookup(&[("CART_STRICT_QUANTITY", "TRUE")])).unwrap();
        assert_eq!(config.quantity_policy, QuantityPolicy::Strict);

        let config = CartConfig::from_lookup(lookup(&[("CART_STRICT_QUANTITY", "off")])).unwrap();
        assert_eq!(config.quantity_policy, QuantityPolicy::Permissive);
    }

    #[test]
    fn test_strict_quantity_invalid() {
        let result = CartConfig::from_lookup(lookup(&[("CART_STRICT_QUANTITY", "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
