//! The admin "Add New Product" form.

use serde::{Deserialize, Serialize};

use crate::product::Category;

/// Form state for creating a product.
///
/// Numeric inputs stay as the raw strings the user typed; the backend does
/// the conversion. Serializes to exactly the body `POST /products` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub quantity: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductForm {
    /// Restores the empty defaults after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
