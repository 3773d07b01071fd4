//! Catalog inspection commands.

use std::path::PathBuf;

use sportsgear_core::OrderStatus;
use sportsgear_storefront::catalog::{CatalogProvider, InMemoryCatalog};

use super::CommandError;

/// Open the catalog from `file`, `SPORTSGEAR_CATALOG_PATH`, or the built-in mock.
///
/// # Errors
///
/// Returns an error if a catalog file is given but cannot be loaded.
pub fn open(file: Option<PathBuf>) -> Result<InMemoryCatalog, CommandError> {
    dotenvy::dotenv().ok();

    let path = file.or_else(|| {
        std::env::var("SPORTSGEAR_CATALOG_PATH")
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    match path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Ok(InMemoryCatalog::load(&path)?)
        }
        None => Ok(InMemoryCatalog::seeded()),
    }
}

/// List products.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[allow(clippy::print_stdout)]
pub fn products(catalog: &dyn CatalogProvider, json: bool) -> Result<(), CommandError> {
    let products = catalog.fetch_products()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    println!(
        "{:>4}  {:<32} {:<12} {:>10} {:>10} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "WEIGHT", "STOCK"
    );
    for product in &products {
        println!(
            "{:>4}  {:<32} {:<12} {:>10} {:>10} {:>6}",
            product.id.to_string(),
            product.name,
            product.category.label(),
            product.price.display(),
            product.weight.to_string(),
            product.stock
        );
    }
    Ok(())
}

/// List orders, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[allow(clippy::print_stdout)]
pub fn orders(
    catalog: &dyn CatalogProvider,
    status: Option<OrderStatus>,
    json: bool,
) -> Result<(), CommandError> {
    let orders: Vec<_> = catalog
        .fetch_orders()?
        .into_iter()
        .filter(|order| status.is_none_or(|wanted| order.status == wanted))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    println!(
        "{:>6}  {:<20} {:<12} {:<17} {:>10}",
        "ID", "CUSTOMER", "STATUS", "PLACED", "TOTAL"
    );
    for order in &orders {
        println!(
            "{:>6}  {:<20} {:<12} {:<17} {:>10}",
            order.id.to_string(),
            order.customer_name,
            order.status.label(),
            order.placed_at.format("%Y-%m-%d %H:%M").to_string(),
            order.total.display()
        );
    }
    Ok(())
}
