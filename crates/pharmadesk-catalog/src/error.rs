//! Catalog error types.

use thiserror::Error;

/// Errors raised by catalog validation and pricing rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Discount outside of 0..=100.
    #[error("Invalid discount percentage: {0}")]
    InvalidDiscount(u32),

    /// Identifier was empty.
    #[error("Empty identifier for {0}")]
    EmptyId(&'static str),

    /// Coupon code past its expiry date.
    #[error("Coupon code has expired: {0}")]
    CouponExpired(String),

    /// Coupon exists but is switched off.
    #[error("Coupon code is inactive: {0}")]
    CouponInactive(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
