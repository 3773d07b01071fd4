//! Line items and the navigation payload that starts a checkout.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId, TotalWeight, Weight};

/// One unit of a product placed into an order context.
///
/// Line items are immutable for the duration of a checkout. There is no
/// quantity: adding the same product twice yields two line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub weight: Weight,
    pub image_ref: String,
}

impl From<&Product> for LineItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            weight: product.weight.clone(),
            image_ref: product.image_ref.clone(),
        }
    }
}

/// Sum of unit prices.
#[must_use]
pub fn subtotal(items: &[LineItem]) -> Price {
    items.iter().map(|item| item.unit_price).sum()
}

/// Sum of weights; poisoned by any unparseable weight.
#[must_use]
pub fn total_weight(items: &[LineItem]) -> TotalWeight {
    items.iter().map(|item| &item.weight).sum()
}

/// Payload handed from the cart to the checkout: `{ "products": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub products: Vec<LineItem>,
}
