//! Products and their categories.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::form::ProductForm;
use crate::money::Money;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Textile,
    Fertilizer,
}

impl Category {
    /// Wire name, as shown on the category badge.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Textile => "TEXTILE",
            Category::Fertilizer => "FERTILIZER",
        }
    }

    /// Human label used by the category selector.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Textile => "Textile",
            Category::Fertilizer => "Fertilizer",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub quantity: u32,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Converts a submitted form into a product, the way the backend does.
    ///
    /// Price and quantity arrive as raw strings; anything that does not parse
    /// is rejected here rather than on the client.
    pub fn from_form(id: EntityId, form: &ProductForm) -> Result<Self> {
        let price = Money::parse_dollars(&form.price)?;
        let quantity = parse_quantity(&form.quantity)?;

        Ok(Self {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            price,
            quantity,
            category: form.category,
            images: images_from_urls(&form.images),
        })
    }

    /// Best-effort rendering of a form that has not been confirmed yet.
    ///
    /// Unparseable numbers show as zero until the backend answers.
    pub fn preview(id: EntityId, form: &ProductForm) -> Self {
        Self {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            price: Money::parse_dollars(&form.price).unwrap_or_default(),
            quantity: parse_quantity(&form.quantity).unwrap_or(0),
            category: form.category,
            images: images_from_urls(&form.images),
        }
    }

    /// URL of the first image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

fn parse_quantity(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CatalogError::InvalidNumber {
            field: "quantity",
            value: raw.to_string(),
        })
}

fn images_from_urls(urls: &[String]) -> Vec<ProductImage> {
    urls.iter()
        .map(|url| ProductImage { url: url.clone() })
        .collect()
}
