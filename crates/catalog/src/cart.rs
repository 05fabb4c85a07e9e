//! Shopping cart lines.

use common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: EntityId,
    pub product_id: EntityId,
    pub quantity: u32,
}

/// Number shown on the header cart badge: units, not lines.
///
/// Saturates at `u32::MAX` rather than wrapping.
pub fn badge_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
}
