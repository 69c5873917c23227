//! Catalog module.
//!
//! Products and categories as the dashboard caches them.

mod category;
mod product;

pub use category::Category;
pub use product::Product;
