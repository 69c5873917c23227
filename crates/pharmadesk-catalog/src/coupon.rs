//! Coupon codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::discounted_price;
use crate::CatalogError;

/// Whether staff have switched a coupon on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    #[default]
    Active,
    Inactive,
}

/// A percentage-off coupon code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Code the customer types.
    pub code: String,
    /// Whole-percent discount.
    #[serde(default)]
    pub discount_percentage: u32,
    /// Instant after which the code stops working.
    pub expiry_date: DateTime<Utc>,
    /// Activation switch.
    #[serde(default)]
    pub status: CouponStatus,
}

impl Coupon {
    /// Create an active coupon.
    pub fn new(code: impl Into<String>, discount_percentage: u32, expiry_date: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            discount_percentage,
            expiry_date,
            status: CouponStatus::Active,
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: CouponStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the coupon is past its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }

    /// Price of `original_price` after the coupon, checked at `now`.
    ///
    /// Expiry is checked before the status switch.
    pub fn apply(&self, original_price: u64, now: DateTime<Utc>) -> Result<u64, CatalogError> {
        if self.is_expired(now) {
            return Err(CatalogError::CouponExpired(self.code.clone()));
        }
        if self.status != CouponStatus::Active {
            return Err(CatalogError::CouponInactive(self.code.clone()));
        }
        Ok(discounted_price(original_price, self.discount_percentage))
    }
}
