//! CLI command implementations.

pub mod catalog;
pub mod password;
pub mod quote;

use sportsgear_storefront::catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// At least one weight is required for a quote.
    #[error("no weights given; pass --weight for each item")]
    NoWeights,

    /// Catalog could not be loaded or queried.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
