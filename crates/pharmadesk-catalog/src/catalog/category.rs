//! Product categories.

use crate::ids::CategoryId;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// A flat product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Create a category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check that the category can be saved.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::EmptyId("category"));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::ValidationError(
                "category name is required".to_string(),
            ));
        }
        Ok(())
    }
}
