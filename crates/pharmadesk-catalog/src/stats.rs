//! Stock counts for the dashboard overview.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Product counts behind the overview chart.
///
/// Availability follows the `in_stock` flag staff set, not the `stock`
/// quantity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of products.
    pub total: usize,
    /// Products flagged in stock.
    pub in_stock: usize,
    /// Products flagged out of stock.
    pub out_of_stock: usize,
}

impl CatalogStats {
    /// Count `products`.
    pub fn from_products(products: &[Product]) -> Self {
        let in_stock = products.iter().filter(|p| p.in_stock).count();
        Self {
            total: products.len(),
            in_stock,
            out_of_stock: products.len() - in_stock,
        }
    }

    /// Share of products flagged in stock, in percent. An empty catalog
    /// reports 0.
    pub fn in_stock_percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.in_stock * 100 + self.total / 2) / self.total) as u32
    }
}
