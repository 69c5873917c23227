//! Search module.
//!
//! Pagination arithmetic for product listings.

mod pagination;

pub use pagination::{paginate, total_pages, Pagination};
