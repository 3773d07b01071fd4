//! Placed order snapshot.
//!
//! An [`Order`] is what the checkout hands to the confirmation view. It is
//! never persisted; losing the session loses the order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checkout::CustomerDetails;
use crate::line_item::LineItem;
use crate::shipping::ShippingMethod;
use crate::types::Price;

/// An order placed at the end of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Short reference shown to the customer, e.g. `SG-1A2B3C4D`.
    pub reference: String,
    pub items: Vec<LineItem>,
    pub shipping_method: ShippingMethod,
    pub customer: CustomerDetails,
    pub subtotal: Price,
    pub shipping_cost: Price,
    #[serde(alias = "computedTotal")]
    pub total: Price,
}

impl Order {
    /// Build an order; the total is `subtotal + shipping_cost`.
    #[must_use]
    pub fn new(
        items: Vec<LineItem>,
        shipping_method: ShippingMethod,
        customer: CustomerDetails,
        subtotal: Price,
        shipping_cost: Price,
    ) -> Self {
        Self {
            reference: new_reference(),
            items,
            shipping_method,
            customer,
            subtotal,
            shipping_cost,
            total: subtotal + shipping_cost,
        }
    }
}

/// Payload handed to the confirmation view: `{ "orderDetails": {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_details: Order,
}

fn new_reference() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    let short: String = simple.chars().take(8).collect();
    format!("SG-{}", short.to_uppercase())
}
