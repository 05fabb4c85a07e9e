//! Dashboard and storefront views.

pub mod header;
pub mod orders;
pub mod products;
pub mod stats;
pub mod users;

use serde::Serialize;

pub use header::{AccountMenu, HeaderView, MenuEntry, NavLink};
pub use orders::{OrderRow, OrdersTable};
pub use products::{ProductCard, ProductGrid};
pub use stats::{StatIcon, StatsCard, StatsSummary};
pub use users::{UserRow, UsersTable};

/// Colour of a badge or stats card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    Yellow,
}

/// A short coloured label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}
