//! The product repository seam.

use std::sync::Arc;

use async_trait::async_trait;
use pharmadesk_catalog::Product;

use crate::StoreResult;

/// Read access to the product collection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product in the collection.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Products whose name matches `text`.
    async fn search(&self, text: &str) -> StoreResult<Vec<Product>>;
}

/// Repository handle shared between a view-model and its background tasks.
pub type SharedRepository = Arc<dyn ProductRepository>;

/// Name match used by the local backends: case-insensitive substring.
pub fn name_matches(product: &Product, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    !needle.is_empty() && product.name.to_lowercase().contains(&needle)
}
