//! Shipping cost calculation.
//!
//! Express shipping is a flat rate. Standard shipping is tiered on the total
//! weight of the order:
//!
//! | total weight (kg) | standard | express |
//! |-------------------|----------|---------|
//! | `<= 35`           | $15      | $25     |
//! | `(35, 70]`        | $30      | $25     |
//! | `> 70`            | $45      | $25     |
//!
//! A total that cannot be computed (some item weight did not parse) matches
//! neither upper tier and is charged the base standard rate.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::line_item::{LineItem, total_weight};
use crate::types::{Price, TotalWeight};

const EXPRESS_FLAT_RATE: i64 = 25;
const HEAVY_RATE: i64 = 45;
const MEDIUM_RATE: i64 = 30;
const BASE_RATE: i64 = 15;

const HEAVY_THRESHOLD_KG: i64 = 70;
const MEDIUM_THRESHOLD_KG: i64 = 35;

/// How the order is shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Express => f.write_str("express"),
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(format!("invalid shipping method: {s}")),
        }
    }
}

/// Shipping cost for a set of line items.
#[must_use]
pub fn shipping_cost(items: &[LineItem], method: ShippingMethod) -> Price {
    cost_for_weight(total_weight(items), method)
}

/// Shipping cost for an already-summed weight.
#[must_use]
pub fn cost_for_weight(weight: TotalWeight, method: ShippingMethod) -> Price {
    let rate = match method {
        ShippingMethod::Express => EXPRESS_FLAT_RATE,
        ShippingMethod::Standard if weight.exceeds(Decimal::from(HEAVY_THRESHOLD_KG)) => {
            HEAVY_RATE
        }
        ShippingMethod::Standard if weight.exceeds(Decimal::from(MEDIUM_THRESHOLD_KG)) => {
            MEDIUM_RATE
        }
        ShippingMethod::Standard => BASE_RATE,
    };
    Price::dollars(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::line_item::CheckoutPayload;
    use crate::types::{ProductId, Weight};

    fn items(weights: &[i64]) -> Vec<LineItem> {
        weights
            .iter()
            .zip(1..)
            .map(|(kg, id)| LineItem {
                id: ProductId::new(id),
                name: format!("item-{id}"),
                unit_price: Price::dollars(10),
                weight: Weight::Kilograms(Decimal::from(*kg)),
                image_ref: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_standard_tiers() {
        assert_eq!(shipping_cost(&items(&[10, 10, 10]), ShippingMethod::Standard), Price::dollars(15));
        assert_eq!(shipping_cost(&items(&[20, 20]), ShippingMethod::Standard), Price::dollars(30));
        assert_eq!(shipping_cost(&items(&[40, 40]), ShippingMethod::Standard), Price::dollars(45));
    }

    #[test]
    fn test_tier_boundaries_are_exclusive() {
        assert_eq!(shipping_cost(&items(&[35]), ShippingMethod::Standard), Price::dollars(15));
        assert_eq!(shipping_cost(&items(&[70]), ShippingMethod::Standard), Price::dollars(30));

        let just_over = vec![LineItem {
            weight: Weight::parse("35.01"),
            ..items(&[0]).remove(0)
        }];
        assert_eq!(shipping_cost(&just_over, ShippingMethod::Standard), Price::dollars(30));
    }

    #[test]
    fn test_express_is_flat() {
        for weights in [&[1][..], &[20, 20][..], &[40, 40][..], &[500][..]] {
            assert_eq!(shipping_cost(&items(weights), ShippingMethod::Express), Price::dollars(25));
        }
    }

    #[test]
    fn test_empty_order() {
        assert_eq!(shipping_cost(&[], ShippingMethod::Standard), Price::dollars(15));
        assert_eq!(shipping_cost(&[], ShippingMethod::Express), Price::dollars(25));
    }

    #[test]
    fn test_negative_weights_are_not_validated() {
        assert_eq!(shipping_cost(&items(&[100, -50]), ShippingMethod::Standard), Price::dollars(30));
    }

    #[test]
    fn test_unparseable_weight_falls_to_base_rate() {
        let mut heavy = items(&[80]);
        heavy.extend(items(&[0]).into_iter().map(|item| LineItem {
            weight: Weight::parse("about 5kg"),
            ..item
        }));
        assert_eq!(shipping_cost(&heavy, ShippingMethod::Standard), Price::dollars(15));
        assert_eq!(shipping_cost(&heavy, ShippingMethod::Express), Price::dollars(25));
    }

    #[test]
    fn test_unit_suffixed_weights_use_leading_number() {
        let json = r#"{"products": [
            {"id": 1, "name": "Plate", "unitPrice": "40", "weight": "20kg", "imageRef": ""},
            {"id": 2, "name": "Plate", "unitPrice": "40", "weight": "20kg", "imageRef": ""},
            {"id": 3, "name": "Plate", "unitPrice": "40", "weight": "20kg", "imageRef": ""},
            {"id": 4, "name": "Plate", "unitPrice": "40", "weight": "20kg", "imageRef": ""}
        ]}"#;
        let payload: CheckoutPayload = serde_json::from_str(json).unwrap();
        assert_eq!(shipping_cost(&payload.products, ShippingMethod::Standard), Price::dollars(45));

        // "5-25kg" reads as 5.
        let ranged: Vec<LineItem> = items(&[32])
            .into_iter()
            .chain(items(&[0]).into_iter().map(|item| LineItem {
                weight: Weight::parse("5-25kg"),
                ..item
            }))
            .collect();
        assert_eq!(shipping_cost(&ranged, ShippingMethod::Standard), Price::dollars(30));
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("Express".parse::<ShippingMethod>(), Ok(ShippingMethod::Express));
        assert!("overnight".parse::<ShippingMethod>().is_err());
    }
}
