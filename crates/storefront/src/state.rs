//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogProvider;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Views reach the catalog only through the
/// [`CatalogProvider`] trait object held here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the catalog provider.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.inner.catalog.as_ref()
    }
}
