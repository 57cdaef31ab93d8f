//! Trade amounts in yuan using fixed-point decimal.
//!
//! Alipay expresses `total_amount` in yuan with at most two decimal places.
//! The value is carried exactly as given (`1`, `88.8`, `88.88`) so that the
//! signed text matches what the merchant entered. Never use f64 for money.

use crate::{AlipayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A yuan amount.
///
/// Serializes as a JSON string to preserve precision.
///
/// # Examples
///
/// ```rust
/// use alipay_lib::Amount;
///
/// let a = Amount::from_str_checked("88.88").unwrap();
/// assert_eq!(a.to_string(), "88.88");
/// assert_eq!(a.to_fen(), Some(8888));
/// assert_eq!(Amount::from_fen(150).to_string(), "1.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Smallest amount the gateway accepts.
    pub const MIN_TRADE: Amount = Amount {
        value: Decimal::from_parts(1, 0, 0, false, 2),
    };

    /// Largest amount the gateway accepts (100,000,000.00 yuan).
    pub const MAX_TRADE: Amount = Amount {
        value: Decimal::from_parts(100_000_000, 0, 0, false, 0),
    };

    /// Create from whole yuan.
    pub fn from_yuan(yuan: i64) -> Self {
        Self {
            value: Decimal::from(yuan),
        }
    }

    /// Create from fen (hundredths of a yuan).
    pub fn from_fen(fen: i64) -> Self {
        Self {
            value: Decimal::new(fen, 2),
        }
    }

    /// Create from a decimal string (e.g., "123.45").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal number.
    pub fn from_str_checked(s: &str) -> Result<Self> {
        Decimal::from_str(s.trim())
            .map(|value| Self { value })
            .map_err(|e| AlipayError::InvalidAmount(format!("{}: {}", s, e)))
    }

    /// The underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Value in fen, or `None` if it has sub-fen precision or overflows.
    pub fn to_fen(&self) -> Option<i64> {
        let fen = self.value.checked_mul(Decimal::ONE_HUNDRED)?;
        if !fen.fract().is_zero() {
            return None;
        }
        i64::try_from(fen).ok()
    }

    /// Returns true if the amount fits the gateway's accepted range and
    /// has no more than two decimal places.
    pub fn is_valid_trade_amount(&self) -> bool {
        self.to_fen().is_some() && *self >= Self::MIN_TRADE && *self <= Self::MAX_TRADE
    }

    /// Checked addition (returns None on overflow).
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.value
            .checked_add(other.value)
            .map(|value| Self { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Amount {
    type Err = AlipayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_checked(s)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_given_scale() {
        assert_eq!(Amount::from_yuan(1).to_string(), "1");
        assert_eq!(Amount::from_fen(8888).to_string(), "88.88");
        assert_eq!(Amount::from_str_checked("88.80").unwrap().to_string(), "88.80");
    }

    #[test]
    fn test_to_fen() {
        assert_eq!(Amount::from_yuan(12).to_fen(), Some(1200));
        assert_eq!(Amount::from_str_checked("0.01").unwrap().to_fen(), Some(1));
        assert_eq!(Amount::from_str_checked("0.001").unwrap().to_fen(), None);
    }

    #[test]
    fn test_trade_range() {
        assert!(Amount::MIN_TRADE.is_valid_trade_amount());
        assert!(Amount::MAX_TRADE.is_valid_trade_amount());
        assert!(Amount::from_yuan(1).is_valid_trade_amount());
        assert!(!Amount::from_yuan(0).is_valid_trade_amount());
        assert!(!Amount::from_yuan(100_000_001).is_valid_trade_amount());
        assert!(!Amount::from_str_checked("1.005").unwrap().is_valid_trade_amount());
    }

    #[test]
    fn test_invalid_string() {
        let err = Amount::from_str_checked("one yuan").unwrap_err();
        assert!(matches!(err, AlipayError::InvalidAmount(_)));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Amount::from_fen(150)).unwrap();
        assert_eq!(json, "\"1.50\"");

        let back: Amount = serde_json::from_str("\"1.50\"").unwrap();
        assert_eq!(back, Amount::from_fen(150));
    }

    #[test]
    fn test_checked_add() {
        let sum = Amount::from_fen(50).checked_add(&Amount::from_yuan(1)).unwrap();
        assert_eq!(sum.to_fen(), Some(150));
    }
}
