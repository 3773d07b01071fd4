//! Item weights in kilograms.
//!
//! Weights arrive in navigation payloads either as JSON numbers or as
//! strings such as `"20kg"` or `"5-25kg"`. A string is read by its leading
//! number, so those are 20 and 5. A value with no leading number is kept as
//! [`Weight::Unparseable`] rather than rejected: it poisons any total it is
//! summed into, and a poisoned total never exceeds a threshold.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weight of a single line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Weight {
    /// A numeric weight in kilograms. Negative values are not rejected.
    Kilograms(Decimal),
    /// The raw input that failed to parse as a number.
    Unparseable(String),
}

impl Weight {
    /// Weight from a decimal number of kilograms.
    #[must_use]
    pub const fn kilograms(kg: Decimal) -> Self {
        Self::Kilograms(kg)
    }

    /// Parse a weight from free text.
    ///
    /// Leading whitespace is skipped and the longest prefix that reads as a
    /// decimal number (optional sign, fraction and exponent) is taken; the
    /// rest is ignored. Text with no such prefix, including the empty string,
    /// yields [`Weight::Unparseable`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        leading_decimal(raw).map_or_else(|| Self::Unparseable(raw.to_owned()), Self::Kilograms)
    }

    /// The numeric value, if the weight parsed.
    #[must_use]
    pub const fn as_kilograms(&self) -> Option<Decimal> {
        match self {
            Self::Kilograms(kg) => Some(*kg),
            Self::Unparseable(_) => None,
        }
    }
}

/// The number at the start of `raw`, if there is one.
fn leading_decimal(raw: &str) -> Option<Decimal> {
    let mut chars = raw.trim_start().chars().peekable();

    let negative = chars.next_if(|c| matches!(*c, '+' | '-')) == Some('-');

    let mut mantissa = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        mantissa.push(c);
    }
    let int_digits = mantissa.len();
    if chars.next_if_eq(&'.').is_some() {
        mantissa.push('.');
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            mantissa.push(c);
        }
    }
    if int_digits == 0 && mantissa.len() <= 1 {
        return None;
    }
    if int_digits == 0 {
        mantissa.insert(0, '0');
    }
    if mantissa.ends_with('.') {
        mantissa.pop();
    }

    // An exponent marker with no digits after it is not part of the number.
    let mut exponent = String::new();
    if chars.next_if(|c| matches!(*c, 'e' | 'E')).is_some() {
        if chars.next_if(|c| matches!(*c, '+' | '-')) == Some('-') {
            exponent.push('-');
        }
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            exponent.push(c);
        }
        if !exponent.ends_with(|c: char| c.is_ascii_digit()) {
            exponent.clear();
        }
    }

    let value = if exponent.is_empty() {
        Decimal::from_str(&mantissa).ok()?
    } else {
        Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok()?
    };
    Some(if negative { -value } else { value })
}

impl From<Decimal> for Weight {
    fn from(kg: Decimal) -> Self {
        Self::Kilograms(kg)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kilograms(kg) => write!(f, "{kg} kg"),
            Self::Unparseable(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Kilograms(kg) => Serialize::serialize(kg, serializer),
            Self::Unparseable(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WeightVisitor)
    }
}

struct WeightVisitor;

impl Visitor<'_> for WeightVisitor {
    type Value = Weight;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Weight::Kilograms(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Weight::Kilograms(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Weight::parse(&v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Weight::parse(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Weight::Unparseable(String::new()))
    }
}

/// Sum of line item weights.
///
/// `None` once any unparseable weight has been added. Comparisons against a
/// poisoned total are always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalWeight(Option<Decimal>);

impl TotalWeight {
    /// The numeric total, if every weight parsed.
    #[must_use]
    pub const fn as_kilograms(&self) -> Option<Decimal> {
        self.0
    }

    /// Whether the total is strictly greater than `limit` kilograms.
    #[must_use]
    pub fn exceeds(&self, limit: Decimal) -> bool {
        self.0.is_some_and(|kg| kg > limit)
    }
}

impl<'a> Sum<&'a Weight> for TotalWeight {
    fn sum<I: Iterator<Item = &'a Weight>>(iter: I) -> Self {
        Self(iter.fold(Some(Decimal::ZERO), |acc, weight| {
            acc.zip(weight.as_kilograms()).map(|(a, b)| a + b)
        }))
    }
}

impl fmt::Display for TotalWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(kg) => write!(f, "{kg} kg"),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kg(v: i64) -> Weight {
        Weight::Kilograms(Decimal::from(v))
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(Weight::parse("12.5"), Weight::Kilograms(Decimal::new(125, 1)));
        assert_eq!(Weight::parse("  3 "), kg(3));
        assert_eq!(Weight::parse("-2"), kg(-2));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(Weight::parse("heavy"), Weight::Unparseable("heavy".to_string()));
        assert_eq!(Weight::parse(""), Weight::Unparseable(String::new()));
        assert_eq!(Weight::parse("kg 20"), Weight::Unparseable("kg 20".to_string()));
        assert!(Weight::parse("-").as_kilograms().is_none());
        assert!(Weight::parse(".kg").as_kilograms().is_none());
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(Weight::parse("20kg"), kg(20));
        assert_eq!(Weight::parse("0.8kg"), Weight::Kilograms(Decimal::new(8, 1)));
        assert_eq!(Weight::parse("5-25kg"), kg(5));
        assert_eq!(Weight::parse("  12 kg"), kg(12));
        assert_eq!(Weight::parse(".5kg"), Weight::Kilograms(Decimal::new(5, 1)));
        assert_eq!(Weight::parse("7.kg"), kg(7));
        assert_eq!(Weight::parse("+3"), kg(3));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(Weight::parse("1e2kg"), kg(100));
        assert_eq!(Weight::parse("25E-1"), Weight::Kilograms(Decimal::new(25, 1)));
        assert_eq!(Weight::parse("2e+1"), kg(20));
        // A dangling exponent marker is ignored.
        assert_eq!(Weight::parse("3e"), kg(3));
        assert_eq!(Weight::parse("3e+kg"), kg(3));
    }

    #[test]
    fn test_serialize_kilograms() {
        let json = serde_json::to_string(&Weight::Kilograms(Decimal::new(125, 2))).unwrap();
        let back: Weight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Weight::Kilograms(Decimal::new(125, 2)));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let w: Weight = serde_json::from_str("40").unwrap();
        assert_eq!(w, kg(40));

        let w: Weight = serde_json::from_str("\"1.25\"").unwrap();
        assert_eq!(w, Weight::Kilograms(Decimal::new(125, 2)));

        let w: Weight = serde_json::from_str("\"n/a\"").unwrap();
        assert!(w.as_kilograms().is_none());

        let w: Weight = serde_json::from_str("\"20kg\"").unwrap();
        assert_eq!(w, kg(20));
    }

    #[test]
    fn test_total_sums_weights() {
        let weights = [kg(10), kg(10), kg(10)];
        let total: TotalWeight = weights.iter().sum();
        assert_eq!(total.as_kilograms(), Some(Decimal::from(30)));
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        let total: TotalWeight = core::iter::empty::<&Weight>().sum();
        assert_eq!(total.as_kilograms(), Some(Decimal::ZERO));
        assert!(!total.exceeds(Decimal::ZERO));
    }

    #[test]
    fn test_unparseable_poisons_total() {
        let weights = [kg(100), Weight::parse("abc")];
        let total: TotalWeight = weights.iter().sum();
        assert_eq!(total.as_kilograms(), None);
        assert!(!total.exceeds(Decimal::from(35)));
        assert!(!total.exceeds(Decimal::from(-1_000)));
    }
}
