//! Discount arithmetic.
//!
//! Prices are integers in the minor currency unit. Discounts are whole
//! percentages and the discounted price rounds half up, so `1` at `50%`
//! stays `1`.

use crate::CatalogError;

/// Largest discount a product or coupon may carry.
pub const MAX_DISCOUNT_PERCENTAGE: u32 = 100;

/// Price after taking `discount_percentage` off `price`.
///
/// Percentages above 100 are treated as 100.
pub fn discounted_price(price: u64, discount_percentage: u32) -> u64 {
    let pct = discount_percentage.min(MAX_DISCOUNT_PERCENTAGE) as u128;
    let kept = price as u128 * (100 - pct);
    ((kept + 50) / 100) as u64
}

/// Reject percentages outside `0..=100`.
pub fn validate_discount(discount_percentage: u32) -> Result<u32, CatalogError> {
    if discount_percentage > MAX_DISCOUNT_PERCENTAGE {
        return Err(CatalogError::InvalidDiscount(discount_percentage));
    }
    Ok(discount_percentage)
}

/// Amount taken off by the discount.
pub fn savings(price: u64, discount_percentage: u32) -> u64 {
    price - discounted_price(price, discount_percentage)
}
