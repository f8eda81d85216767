//! Product catalog loaded from a JSON file at startup.
//!
//! The catalog is the source of truth for product prices: carts are built
//! from catalog entries looked up by handle, never from submitted text.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use harbor_core::Size;
use harbor_core::filter::Filterable;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product handle: {0}")]
    DuplicateHandle(String),

    #[error("product {0} has a negative price")]
    NegativePrice(String),

    #[error("product {0} has no sizes")]
    NoSizes(String),
}

/// A product offered in the shop.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub handle: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub collection: String,
    pub image: String,
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    #[must_use]
    pub fn offers_size(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }
}

impl Filterable for Product {
    fn category(&self) -> &str {
        &self.category
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}

/// All products, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any product is invalid.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(products = catalog.len(), path = %path.display(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse the catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any product is invalid.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(raw)?)
    }

    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate handles, negative prices or products
    /// without sizes.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut handles = HashSet::new();
        for product in &products {
            if !handles.insert(product.handle.as_str()) {
                return Err(CatalogError::DuplicateHandle(product.handle.clone()));
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.handle.clone()));
            }
            if product.sizes.is_empty() {
                return Err(CatalogError::NoSizes(product.handle.clone()));
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by handle.
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Distinct categories, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct collections, in first-seen order.
    #[must_use]
    pub fn collections(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.collection.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
