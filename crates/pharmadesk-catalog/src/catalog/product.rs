//! Product type.

use crate::ids::ProductId;
use crate::pricing::{self, discounted_price};
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// A product as listed in the admin catalog.
///
/// `in_stock` is a flag staff toggle by hand; it is not derived from
/// `stock`, so a product can be out of stock with units on the shelf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Product name as entered by staff.
    pub name: String,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in the minor currency unit.
    pub price: u64,
    /// Whole-percent discount, 0..=100.
    pub discount_percentage: u32,
    /// Units on hand.
    pub stock: u64,
    /// Availability flag shown in the listing.
    pub in_stock: bool,
    /// Single free-text label.
    pub tags: String,
    /// Primary image URI.
    pub image_url: String,
    /// Image shown on hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_image_url: Option<String>,
}

impl Product {
    /// Create an in-stock product with no discount and no images.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            discount_percentage: 0,
            stock: 0,
            in_stock: true,
            tags: String::new(),
            image_url: String::new(),
            hover_image_url: None,
        }
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, discount_percentage: u32) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }

    /// Set stock count and availability flag.
    pub fn with_stock(mut self, stock: u64, in_stock: bool) -> Self {
        self.stock = stock;
        self.in_stock = in_stock;
        self
    }

    /// Set the tag label.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Set the image URIs.
    pub fn with_images(mut self, image_url: impl Into<String>, hover: Option<String>) -> Self {
        self.image_url = image_url.into();
        self.hover_image_url = hover;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Price after the product discount.
    pub fn discounted_price(&self) -> u64 {
        discounted_price(self.price, self.discount_percentage)
    }

    /// Whether a discount applies at all.
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage > 0
    }

    /// Name with the first character upper-cased, as shown in listings.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Exact match on the tag label.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags == tag
    }

    /// Check the invariants the store does not enforce.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::EmptyId("product"));
        }
        pricing::validate_discount(self.discount_percentage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults() {
        let p = Product::new("p1", "ibuprofen", 899);
        assert_eq!(p.price, 899);
        assert_eq!(p.discount_percentage, 0);
        assert!(p.in_stock);
        assert!(!p.is_discounted());
        assert_eq!(p.discounted_price(), 899);
    }

    #[test]
    fn test_discounted_price_uses_percentage() {
        let p = Product::new("p1", "ibuprofen", 1000).with_discount(15);
        assert_eq!(p.discounted_price(), 850);
        assert!(p.is_discounted());
    }

    #[test]
    fn test_in_stock_is_independent_of_count() {
        let p = Product::new("p1", "zinc", 100).with_stock(40, false);
        assert_eq!(p.stock, 40);
        assert!(!p.in_stock);
    }

    #[test]
    fn test_display_name_capitalizes_first_char() {
        assert_eq!(Product::new("p1", "aspirin", 1).display_name(), "Aspirin");
        assert_eq!(Product::new("p1", "élixir", 1).display_name(), "Élixir");
        assert_eq!(Product::new("p1", "", 1).display_name(), "");
    }

    #[test]
    fn test_validate_rejects_bad_discount() {
        let p = Product::new("p1", "x", 1).with_discount(120);
        assert_eq!(p.validate(), Err(CatalogError::InvalidDiscount(120)));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let p = Product::new("", "x", 1);
        assert_eq!(p.validate(), Err(CatalogError::EmptyId("product")));
    }

    #[test]
    fn test_serializes_camel_case() {
        let p = Product::new("p1", "x", 1).with_stock(3, true);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["discountPercentage"], 0);
        assert_eq!(json["inStock"], true);
        assert!(json.get("hoverImageUrl").is_none());
    }
}
