//! Catalog data provider.
//!
//! Views never hold product or order data themselves. They ask the
//! [`CatalogProvider`] in application state, so the in-memory mock can be
//! swapped for a real backend without touching a handler.

mod memory;

pub use memory::InMemoryCatalog;

use sportsgear_core::{AdminOrder, OrderId, Product, ProductId};
use thiserror::Error;

/// Errors returned by a catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with this ID.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No order with this ID.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for the catalog shape.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of products and orders.
pub trait CatalogProvider: Send + Sync {
    /// All products, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn fetch_orders(&self) -> Result<Vec<AdminOrder>, CatalogError>;

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if no product has this ID.
    fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch_products()?
            .into_iter()
            .find(|product| product.id == id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// A single order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::OrderNotFound` if no order has this ID.
    fn fetch_order(&self, id: OrderId) -> Result<AdminOrder, CatalogError> {
        self.fetch_orders()?
            .into_iter()
            .find(|order| order.id == id)
            .ok_or(CatalogError::OrderNotFound(id))
    }
}
