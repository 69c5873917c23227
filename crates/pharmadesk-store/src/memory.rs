//! In-memory product repository (for development/testing).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use pharmadesk_catalog::Product;

use crate::{name_matches, ProductRepository, StoreError, StoreResult};

/// Product repository backed by a vector.
///
/// A failure can be injected to stand in for an unreachable backend.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
    failure: RwLock<Option<StoreError>>,
    list_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl MemoryProductRepository {
    /// Create a repository holding `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            ..Self::default()
        }
    }

    /// Replace the stored products.
    pub fn replace(&self, products: Vec<Product>) {
        *self.products.write() = products;
    }

    /// Make every following call fail with `error`.
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.write() = Some(error);
    }

    /// Stop injecting failures.
    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `search` calls served so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self.failure.read().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.products.read().clone())
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<Product>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let hits: Vec<Product> = self
            .products
            .read()
            .iter()
            .filter(|p| name_matches(p, text))
            .cloned()
            .collect();
        tracing::debug!(query = text, hits = hits.len(), "memory search");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MemoryProductRepository {
        MemoryProductRepository::new(vec![
            Product::new("p1", "Aspirin", 100),
            Product::new("p2", "Aspirin Forte", 200),
            Product::new("p3", "Zinc", 300),
        ])
    }

    #[tokio::test]
    async fn test_list_returns_everything() {
        let repo = repo();
        assert_eq!(repo.list().await.unwrap().len(), 3);
        assert_eq!(repo.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_search_filters_by_name() {
        let repo = repo();
        let hits = repo.search("aspirin").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(repo.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_search_without_hits_is_ok_and_empty() {
        let repo = repo();
        assert_eq!(repo.search("morphine").await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_injected_failure_and_recovery() {
        let repo = repo();
        repo.fail_with(StoreError::Unavailable("offline".into()));
        assert_eq!(
            repo.search("aspirin").await,
            Err(StoreError::Unavailable("offline".into()))
        );
        assert!(repo.list().await.is_err());

        repo.recover();
        assert!(repo.list().await.is_ok());
    }
}
