//! Catalog domain types for the PharmaDesk admin dashboard.
//!
//! - **Catalog**: products and categories as cached from the document store
//! - **Pricing**: discount arithmetic in minor currency units, coupons
//! - **Search**: pagination arithmetic for product listings
//! - **Stats**: stock counts for the dashboard overview
//!
//! # Example
//!
//! ```rust
//! use pharmadesk_catalog::prelude::*;
//!
//! let product = Product::new("prod-1", "aspirin 500mg", 1250).with_discount(20);
//! assert_eq!(product.discounted_price(), 1000);
//!
//! let products = vec![product];
//! assert_eq!(paginate(&products, 1, 10).len(), 1);
//! assert_eq!(total_pages(products.len(), 10), 1);
//! ```

pub mod error;
pub mod ids;
pub mod pricing;

pub mod catalog;
pub mod coupon;
pub mod search;
pub mod stats;

pub use error::CatalogError;
pub use ids::*;
pub use pricing::{discounted_price, MAX_DISCOUNT_PERCENTAGE};

pub use catalog::{Category, Product};
pub use coupon::{Coupon, CouponStatus};
pub use search::{paginate, total_pages, Pagination};
pub use stats::CatalogStats;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::pricing::{discounted_price, MAX_DISCOUNT_PERCENTAGE};

    pub use crate::catalog::{Category, Product};
    pub use crate::coupon::{Coupon, CouponStatus};
    pub use crate::search::{paginate, total_pages, Pagination};
    pub use crate::stats::CatalogStats;
}
