//! In-memory catalog.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sportsgear_core::catalog::ProductCategory;
use sportsgear_core::line_item::subtotal;
use sportsgear_core::{
    AdminOrder, LineItem, OrderId, OrderStatus, Price, Product, ProductId, ShippingMethod, Weight,
    shipping_cost,
};

use super::{CatalogError, CatalogProvider};

/// Catalog held entirely in memory.
///
/// Built either from the seeded demo data or from a JSON file of the form
/// `{ "products": [...], "orders": [...] }`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    orders: Vec<AdminOrder>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    orders: Vec<AdminOrder>,
}

impl InMemoryCatalog {
    /// Create a catalog from explicit records.
    #[must_use]
    pub fn new(products: Vec<Product>, mut orders: Vec<AdminOrder>) -> Self {
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Self { products, orders }
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not match the catalog shape.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.products, file.orders))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The demo catalog shipped with the storefront.
    #[must_use]
    pub fn seeded() -> Self {
        let products = seed_products();
        let orders = seed_orders(&products);
        Self::new(products, orders)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    fn fetch_orders(&self) -> Result<Vec<AdminOrder>, CatalogError> {
        Ok(self.orders.clone())
    }
}

// =============================================================================
// Seed Data
// =============================================================================

struct SeedProduct {
    id: i32,
    name: &'static str,
    category: ProductCategory,
    description: &'static str,
    cents: i64,
    /// Weight in grams.
    grams: i64,
    image: &'static str,
    stock: u32,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        name: "Velocity Running Shoes",
        category: ProductCategory::Footwear,
        description: "Lightweight road runners with a responsive foam midsole.",
        cents: 12_999,
        grams: 900,
        image: "/static/img/products/velocity-running-shoes.jpg",
        stock: 24,
    },
    SeedProduct {
        id: 2,
        name: "Pro Match Soccer Ball",
        category: ProductCategory::Equipment,
        description: "Thermally bonded size 5 match ball.",
        cents: 3_499,
        grams: 450,
        image: "/static/img/products/pro-match-soccer-ball.jpg",
        stock: 60,
    },
    SeedProduct {
        id: 3,
        name: "Court King Basketball",
        category: ProductCategory::Equipment,
        description: "Composite leather indoor/outdoor basketball.",
        cents: 2_999,
        grams: 620,
        image: "/static/img/products/court-king-basketball.jpg",
        stock: 40,
    },
    SeedProduct {
        id: 4,
        name: "Breathable Training Tee",
        category: ProductCategory::Apparel,
        description: "Moisture-wicking mesh tee for hard sessions.",
        cents: 2_499,
        grams: 200,
        image: "/static/img/products/breathable-training-tee.jpg",
        stock: 120,
    },
    SeedProduct {
        id: 5,
        name: "Adjustable Dumbbell Set",
        category: ProductCategory::Equipment,
        description: "Pair of adjustable dumbbells, 2 to 12 kg each.",
        cents: 19_999,
        grams: 24_000,
        image: "/static/img/products/adjustable-dumbbell-set.jpg",
        stock: 8,
    },
    SeedProduct {
        id: 6,
        name: "Competition Kettlebell 16 kg",
        category: ProductCategory::Equipment,
        description: "Steel competition kettlebell with a uniform handle.",
        cents: 7_999,
        grams: 16_000,
        image: "/static/img/products/competition-kettlebell.jpg",
        stock: 15,
    },
    SeedProduct {
        id: 7,
        name: "Foldable Treadmill",
        category: ProductCategory::Equipment,
        description: "Compact home treadmill that folds flat for storage.",
        cents: 89_999,
        grams: 72_000,
        image: "/static/img/products/foldable-treadmill.jpg",
        stock: 3,
    },
    SeedProduct {
        id: 8,
        name: "Carbon Tennis Racket",
        category: ProductCategory::Equipment,
        description: "Graphite frame racket, 300 g unstrung.",
        cents: 17_999,
        grams: 300,
        image: "/static/img/products/carbon-tennis-racket.jpg",
        stock: 12,
    },
    SeedProduct {
        id: 9,
        name: "Road Cycling Helmet",
        category: ProductCategory::Accessories,
        description: "Ventilated road helmet with a dial fit system.",
        cents: 8_999,
        grams: 280,
        image: "/static/img/products/road-cycling-helmet.jpg",
        stock: 30,
    },
    SeedProduct {
        id: 10,
        name: "Cork Yoga Mat",
        category: ProductCategory::Accessories,
        description: "Natural cork surface on a rubber base.",
        cents: 4_999,
        grams: 2_100,
        image: "/static/img/products/cork-yoga-mat.jpg",
        stock: 0,
    },
];

struct SeedOrder {
    id: i32,
    customer_name: &'static str,
    email: &'static str,
    product_ids: &'static [i32],
    status: OrderStatus,
    /// Seconds since the Unix epoch.
    placed_at: i64,
}

const SEED_ORDERS: &[SeedOrder] = &[
    SeedOrder {
        id: 1001,
        customer_name: "Jordan Lee",
        email: "jordan.lee@example.com",
        product_ids: &[1, 4],
        status: OrderStatus::Delivered,
        placed_at: 1_767_265_200,
    },
    SeedOrder {
        id: 1002,
        customer_name: "Priya Nair",
        email: "priya.nair@example.com",
        product_ids: &[5, 6],
        status: OrderStatus::Shipped,
        placed_at: 1_769_000_400,
    },
    SeedOrder {
        id: 1003,
        customer_name: "Mateo Garcia",
        email: "mateo.garcia@example.com",
        product_ids: &[7],
        status: OrderStatus::Processing,
        placed_at: 1_770_901_200,
    },
    SeedOrder {
        id: 1004,
        customer_name: "Hannah Schmidt",
        email: "hannah.schmidt@example.com",
        product_ids: &[2, 3, 9],
        status: OrderStatus::Pending,
        placed_at: 1_771_506_000,
    },
    SeedOrder {
        id: 1005,
        customer_name: "Kenji Watanabe",
        email: "kenji.watanabe@example.com",
        product_ids: &[8],
        status: OrderStatus::Cancelled,
        placed_at: 1_768_230_000,
    },
];

fn seed_products() -> Vec<Product> {
    SEED_PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            category: seed.category,
            description: seed.description.to_string(),
            price: Price::from_cents(seed.cents),
            weight: Weight::Kilograms(Decimal::new(seed.grams, 3).normalize()),
            image_ref: seed.image.to_string(),
            stock: seed.stock,
        })
        .collect()
}

fn seed_orders(products: &[Product]) -> Vec<AdminOrder> {
    SEED_ORDERS
        .iter()
        .map(|seed| {
            let items: Vec<LineItem> = seed
                .product_ids
                .iter()
                .filter_map(|id| products.iter().find(|p| p.id.as_i32() == *id))
                .map(LineItem::from)
                .collect();
            let total = subtotal(&items) + shipping_cost(&items, ShippingMethod::Standard);

            AdminOrder {
                id: OrderId::new(seed.id),
                customer_name: seed.customer_name.to_string(),
                email: seed.email.to_string(),
                items,
                status: seed.status,
                placed_at: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(seed.placed_at),
                total,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_products() {
        let catalog = InMemoryCatalog::seeded();
        let products = catalog.fetch_products().unwrap();
        assert_eq!(products.len(), SEED_PRODUCTS.len());
        assert_eq!(products[0].name, "Velocity Running Shoes");
        assert_eq!(
            products[0].weight,
            Weight::Kilograms(Decimal::new(9, 1))
        );
    }

    #[test]
    fn test_orders_newest_first() {
        let orders = InMemoryCatalog::seeded().fetch_orders().unwrap();
        assert!(orders.windows(2).all(|w| w[0].placed_at >= w[1].placed_at));
    }

    #[test]
    fn test_seeded_order_totals_include_shipping() {
        let catalog = InMemoryCatalog::seeded();
        // Treadmill alone is 72 kg: heaviest standard tier.
        let order = catalog.fetch_order(OrderId::new(1003)).unwrap();
        assert_eq!(order.total, Price::from_cents(89_999) + Price::dollars(45));
    }

    #[test]
    fn test_fetch_missing_product() {
        let catalog = InMemoryCatalog::seeded();
        let err = catalog.fetch_product(ProductId::new(999)).unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(id) if id.as_i32() == 999));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "products": [{
                "id": 77, "name": "Jump Rope", "category": "accessories",
                "description": "Speed rope", "price": "12.00", "weight": "0.2",
                "imageRef": "rope.jpg", "stock": 5
            }]
        }"#;
        let catalog = InMemoryCatalog::from_json(json).unwrap();
        let rope = catalog.fetch_product(ProductId::new(77)).unwrap();
        assert_eq!(rope.price, Price::dollars(12));
        assert!(catalog.fetch_orders().unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        assert!(matches!(
            InMemoryCatalog::from_json(r#"{"products": 3}"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
