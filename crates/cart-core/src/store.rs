//! # Product Store Trait
//!
//! Keyed lookup of authoritative product records. The Sanity client is the
//! production implementation; the static `ProductCatalog` serves local
//! development and tests.

use crate::error::CheckoutResult;
use crate::product::{ProductCatalog, ProductRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of truth for product name, price, and image.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch a product by document ID.
    ///
    /// Returns `Ok(None)` when no such product exists. `Err` is reserved for
    /// lookups that could not be answered.
    async fn fetch_product(&self, id: &str) -> CheckoutResult<Option<ProductRecord>>;

    /// Store name (for logging)
    fn store_name(&self) -> &'static str;
}

/// Type alias for a shared product store (dynamic dispatch)
pub type BoxedProductStore = Arc<dyn ProductStore>;

#[async_trait]
impl ProductStore for ProductCatalog {
    async fn fetch_product(&self, id: &str) -> CheckoutResult<Option<ProductRecord>> {
        Ok(self.get(id).cloned())
    }

    fn store_name(&self) -> &'static str {
        "catalog"
    }
}
