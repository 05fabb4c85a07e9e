//! Product grid of the dashboard.

use catalog::Entity;
use common::{EntityId, EntityKind};
use console::{CacheEntry, MutationKind};
use serde::Serialize;

use crate::format::format_usd;
use crate::projection::Projection;

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Category badge, as the backend spells it.
    pub category: String,
    pub stock: u32,
    /// First image, used as the cover.
    pub image: Option<String>,
    /// A confirmed delete is outstanding; the card stays until it settles.
    pub deleting: bool,
    /// Not yet confirmed by the backend.
    pub saving: bool,
}

pub struct ProductGrid;

impl Projection for ProductGrid {
    const NAME: &'static str = "products";
    const KIND: EntityKind = EntityKind::Product;
    type Row = ProductCard;

    fn row(id: &EntityId, entry: &CacheEntry) -> Option<ProductCard> {
        let Entity::Product(product) = entry.effective()? else {
            return None;
        };

        Some(ProductCard {
            id: id.clone(),
            image: product.cover_image().map(str::to_string),
            price: format_usd(product.price),
            category: product.category.as_str().to_string(),
            stock: product.quantity,
            deleting: entry
                .pending
                .as_ref()
                .is_some_and(|p| p.kind == MutationKind::Delete),
            saving: entry.confirmed.is_none(),
            name: product.name,
            description: product.description,
        })
    }
}
