//! Integer price representation.
//!
//! Commerce backends send money as decimal strings (`"19.99"`). The cart view
//! model works on whole integers so that line totals and running totals can be
//! adjusted incrementally without floating point drift. A [`PriceScale`]
//! decides which unit that integer counts:
//!
//! - scale 0 (default): whole currency units, fractional part truncated
//!   (`"19.99"` -> `19`)
//! - scale 2: minor units such as cents (`"19.99"` -> `1999`)
//!
//! ```
//! use cartkit_core::{Price, PriceScale};
//!
//! assert_eq!(Price::parse("19.99", PriceScale::WHOLE).unwrap(), Price::new(19));
//! assert_eq!(Price::parse("19.99", PriceScale::new(2).unwrap()).unwrap(), Price::new(1999));
//! ```

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a plain decimal number.
    #[error("price is not a decimal number: {0:?}")]
    NotNumeric(String),
    /// The input is below zero.
    #[error("price cannot be negative: {0:?}")]
    Negative(String),
    /// The amount is too large to represent once scaled.
    #[error("price is out of range: {0:?}")]
    OutOfRange(String),
    /// The requested scale exceeds [`PriceScale::MAX_DIGITS`].
    #[error("price scale must be at most {max} digits, got {digits}")]
    InvalidScale {
        /// Requested number of minor-unit digits.
        digits: u32,
        /// Maximum supported digits.
        max: u32,
    },
}

/// Number of minor-unit digits kept when parsing decimal price strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PriceScale {
    minor_unit_digits: u32,
}

impl PriceScale {
    /// Largest supported scale (ten-thousandths).
    pub const MAX_DIGITS: u32 = 4;

    /// Whole currency units; any fractional part is truncated.
    pub const WHOLE: Self = Self {
        minor_unit_digits: 0,
    };

    /// Create a scale keeping `minor_unit_digits` fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidScale`] if `minor_unit_digits` exceeds
    /// [`Self::MAX_DIGITS`].
    pub const fn new(minor_unit_digits: u32) -> Result<Self, PriceError> {
        if minor_unit_digits > Self::MAX_DIGITS {
            return Err(PriceError::InvalidScale {
                digits: minor_unit_digits,
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self { minor_unit_digits })
    }

    /// Number of fractional digits kept.
    #[must_use]
    pub const fn minor_unit_digits(&self) -> u32 {
        self.minor_unit_digits
    }

    fn multiplier(self) -> Decimal {
        Decimal::from(10_i64.pow(self.minor_unit_digits))
    }
}

/// An integer money amount in the unit chosen by a [`PriceScale`].
///
/// Prices parsed from input are never negative, but running totals built
/// from them may go below zero when quantities do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from an already-scaled integer amount.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the integer amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Parse a decimal string, truncating digits beyond `scale`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or whitespace only
    /// - Is not a plain decimal (`[+-]digits[.digits]`)
    /// - Is negative
    /// - Does not fit in a `Decimal`, or in an `i64` once scaled
    pub fn parse(s: &str, scale: PriceScale) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if !is_plain_decimal(unsigned) {
            return Err(PriceError::NotNumeric(trimmed.to_owned()));
        }

        // The input is well-formed here, so a failure can only be overflow.
        let value =
            Decimal::from_str(unsigned).map_err(|_| PriceError::OutOfRange(trimmed.to_owned()))?;

        if negative && !value.is_zero() {
            return Err(PriceError::Negative(trimmed.to_owned()));
        }

        value
            .checked_mul(scale.multiplier())
            .map(|scaled| scaled.trunc())
            .and_then(|scaled| scaled.to_i64())
            .map(Self)
            .ok_or_else(|| PriceError::OutOfRange(trimmed.to_owned()))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub const fn times(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(amount) => Some(Self(amount)),
            None => None,
        }
    }

    /// Add two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Self(amount)),
            None => None,
        }
    }

    /// Subtract `other`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(amount) => Some(Self(amount)),
            None => None,
        }
    }
}

/// `digits` or `digits.digits`, ASCII only.
fn is_plain_decimal(s: &str) -> bool {
    fn digits(part: &str) -> bool {
        !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
    }

    match s.split_once('.') {
        Some((whole, fraction)) => digits(whole) && digits(fraction),
        None => digits(s),
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
