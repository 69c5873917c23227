//! Repository over a JSON export of product documents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pharmadesk_catalog::Product;

use crate::{decode_products, name_matches, ProductRepository, StoreError, StoreResult};

/// Reads a document export on every call.
///
/// The file may hold a bare array of documents or a list page
/// (`{"total": n, "documents": [...]}`).
#[derive(Debug, Clone)]
pub struct DocumentFileRepository {
    path: PathBuf,
}

impl DocumentFileRepository {
    /// Create a repository reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The export file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> StoreResult<Vec<Product>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        decode_products(&body)
    }
}

#[async_trait]
impl ProductRepository for DocumentFileRepository {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.read_all().await
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<Product>> {
        let products = self.read_all().await?;
        Ok(products.into_iter().filter(|p| name_matches(p, text)).collect())
    }
}
