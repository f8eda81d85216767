//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::services::{OrderIntakeClient, OrderIntakeError, SubmissionGuard};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("order intake error: {0}")]
    OrderIntake(#[from] OrderIntakeError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog and outbound clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    order_intake: OrderIntakeClient,
    submissions: SubmissionGuard,
}

impl AppState {
    /// Create application state, loading the catalog from the configured path.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the order intake
    /// client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        Self::with_catalog(config, catalog)
    }

    /// Create application state around an already loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the order intake client cannot be built.
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let order_intake = OrderIntakeClient::new(&config.order_intake)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                order_intake,
                submissions: SubmissionGuard::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order intake client.
    #[must_use]
    pub fn order_intake(&self) -> &OrderIntakeClient {
        &self.inner.order_intake
    }

    /// Get a reference to the in-flight submission guard.
    #[must_use]
    pub fn submissions(&self) -> &SubmissionGuard {
        &self.inner.submissions
    }
}
