//! Type-safe price representation using decimal arithmetic.
//!
//! The shop trades in a single currency, so a [`Price`] is a plain decimal
//! amount in dollars. It serializes transparently as the decimal so payloads
//! keep the bare `unitPrice` / `total` fields.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A money amount in the shop currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of dollars.
    #[must_use]
    pub fn dollars(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(1999).display(), "$19.99");
        assert_eq!(Price::dollars(25).to_string(), "$25.00");
    }

    #[test]
    fn test_sum() {
        let prices = [Price::from_cents(1050), Price::from_cents(250)];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::dollars(13));
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_cents(4999)).unwrap();
        assert_eq!(json, "\"49.99\"");
    }

    #[test]
    fn test_deserializes_from_number() {
        let price: Price = serde_json::from_str("89.5").unwrap();
        assert_eq!(price, Price::from_cents(8950));
    }
}
