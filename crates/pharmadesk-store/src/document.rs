//! Raw store documents and their decoding into catalog types.
//!
//! Every field the dashboard reads is named here. Documents that are
//! missing one, carry the wrong type, or break a catalog invariant are
//! rejected with `StoreError::MalformedResponse` at this boundary.

use pharmadesk_catalog::{Category, Product, ProductId};
use serde::Deserialize;

use crate::{StoreError, StoreResult};

/// A product document as the store returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub discount_percentage: u32,
    #[serde(default)]
    pub stock: u64,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hover_image_url: Option<String>,
}

impl TryFrom<ProductDocument> for Product {
    type Error = StoreError;

    fn try_from(doc: ProductDocument) -> StoreResult<Self> {
        let product = Product {
            id: ProductId::new(doc.id),
            name: doc.name,
            description: doc.description,
            price: doc.price,
            discount_percentage: doc.discount_percentage,
            stock: doc.stock,
            in_stock: doc.in_stock,
            tags: doc.tags.unwrap_or_default(),
            image_url: doc.image_url.unwrap_or_default(),
            hover_image_url: doc.hover_image_url.filter(|url| !url.is_empty()),
        };
        product
            .validate()
            .map_err(|e| StoreError::MalformedResponse(format!("product {}: {}", product.id, e)))?;
        Ok(product)
    }
}

/// A category document as the store returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDocument {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<CategoryDocument> for Category {
    type Error = StoreError;

    fn try_from(doc: CategoryDocument) -> StoreResult<Self> {
        let mut category = Category::new(doc.id, doc.name);
        category.description = doc.description;
        category
            .validate()
            .map_err(|e| StoreError::MalformedResponse(format!("category {}: {}", category.id, e)))?;
        Ok(category)
    }
}

/// Either a bare array of documents or a list response page.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentPayload {
    Bare(Vec<serde_json::Value>),
    Page { documents: Vec<serde_json::Value> },
}

impl DocumentPayload {
    fn into_documents(self) -> Vec<serde_json::Value> {
        match self {
            DocumentPayload::Bare(docs) => docs,
            DocumentPayload::Page { documents } => documents,
        }
    }
}

/// Decode one product document.
pub fn decode_product(value: serde_json::Value) -> StoreResult<Product> {
    let doc: ProductDocument = serde_json::from_value(value)?;
    Product::try_from(doc)
}

/// Decode a list response into products.
///
/// One bad document fails the whole response; the error names its index.
pub fn decode_products(body: &str) -> StoreResult<Vec<Product>> {
    decode_all(body, decode_product)
}

/// Decode a list response into categories.
pub fn decode_categories(body: &str) -> StoreResult<Vec<Category>> {
    decode_all(body, |value| {
        let doc: CategoryDocument = serde_json::from_value(value)?;
        Category::try_from(doc)
    })
}

fn decode_all<T>(
    body: &str,
    decode: impl Fn(serde_json::Value) -> StoreResult<T>,
) -> StoreResult<Vec<T>> {
    let payload: DocumentPayload = serde_json::from_str(body)?;
    payload
        .into_documents()
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            decode(value).map_err(|e| match e {
                StoreError::MalformedResponse(msg) => {
                    StoreError::MalformedResponse(format!("document {}: {}", index, msg))
                }
                other => other,
            })
        })
        .collect()
}
