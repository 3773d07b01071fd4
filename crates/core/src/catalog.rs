//! Catalog records served by a catalog provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::line_item::LineItem;
use crate::types::{OrderId, OrderStatus, Price, ProductId, Weight};

/// Product category used for grouping in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Footwear,
    Apparel,
    Equipment,
    Accessories,
}

impl ProductCategory {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Footwear => "Footwear",
            Self::Apparel => "Apparel",
            Self::Equipment => "Equipment",
            Self::Accessories => "Accessories",
        }
    }
}

/// A product in the shop catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: Price,
    pub weight: Weight,
    pub image_ref: String,
    pub stock: u32,
}

impl Product {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// An order as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: OrderId,
    pub customer_name: String,
    pub email: String,
    pub items: Vec<LineItem>,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub total: Price,
}

impl AdminOrder {
    /// Number of line items on the order.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
