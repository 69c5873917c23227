//! File storage URL helpers.

use pharmadesk_catalog::{FileId, Product};
use serde::Serialize;

/// File id embedded in a storage URL of the form `.../files/<id>/...`.
pub fn extract_file_id(url: &str) -> Option<FileId> {
    url.match_indices("files/").find_map(|(at, marker)| {
        let rest = &url[at + marker.len()..];
        match rest.find('/') {
            Some(end) if end > 0 => Some(FileId::new(&rest[..end])),
            _ => None,
        }
    })
}

/// Storage files referenced by a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAssets {
    pub image: Option<FileId>,
    pub hover_image: Option<FileId>,
}

impl ProductAssets {
    /// Collect the file ids from a product's image URIs.
    pub fn of(product: &Product) -> Self {
        Self {
            image: extract_file_id(&product.image_url),
            hover_image: product.hover_image_url.as_deref().and_then(extract_file_id),
        }
    }

    /// Files to delete along with the product, without duplicates.
    pub fn file_ids(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.image.iter().cloned().collect();
        if let Some(hover) = &self.hover_image {
            if self.image.as_ref() != Some(hover) {
                ids.push(hover.clone());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://cloud.example/v1/storage/buckets/products/files/66fa9e/view?project=p";

    #[test]
    fn test_extract_file_id() {
        assert_eq!(extract_file_id(URL), Some(FileId::new("66fa9e")));
    }

    #[test]
    fn test_extract_file_id_needs_trailing_segment() {
        assert_eq!(extract_file_id("https://x/files/66fa9e"), None);
        assert_eq!(extract_file_id("https://x/images/1.png"), None);
        assert_eq!(extract_file_id("https://x/files//files/abc/view"), Some(FileId::new("abc")));
    }

    #[test]
    fn test_hover_image_dropped_when_same_file() {
        let product = Product::new("p1", "x", 1).with_images(URL, Some(URL.to_string()));
        assert_eq!(ProductAssets::of(&product).file_ids(), vec![FileId::new("66fa9e")]);
    }

    #[test]
    fn test_both_images_collected() {
        let hover = "https://cloud.example/v1/storage/buckets/products/files/77ab/view".to_string();
        let product = Product::new("p1", "x", 1).with_images(URL, Some(hover));
        assert_eq!(
            ProductAssets::of(&product).file_ids(),
            vec![FileId::new("66fa9e"), FileId::new("77ab")]
        );
    }

    #[test]
    fn test_no_images() {
        let product = Product::new("p1", "x", 1);
        assert!(ProductAssets::of(&product).file_ids().is_empty());
    }
}
