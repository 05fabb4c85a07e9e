//! Orders table of the dashboard.

use catalog::{Entity, OrderStatus};
use common::{EntityId, EntityKind};
use console::CacheEntry;
use serde::Serialize;

use crate::format::{format_date, format_usd};
use crate::projection::Projection;
use crate::views::{Badge, Tone};

/// One row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub id: EntityId,
    pub customer: String,
    pub total: String,
    /// Badge for the status the backend confirmed.
    pub status: Badge,
    /// Value of the status selector: the pending status if any.
    pub selected: OrderStatus,
    pub date: String,
    /// A status change is in flight.
    pub updating: bool,
}

/// Badge tone of an order status.
pub fn status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Paid => Tone::Green,
        OrderStatus::Pending => Tone::Yellow,
        OrderStatus::Failed => Tone::Red,
    }
}

pub struct OrdersTable;

impl Projection for OrdersTable {
    const NAME: &'static str = "orders";
    const KIND: EntityKind = EntityKind::Order;
    type Row = OrderRow;

    fn row(id: &EntityId, entry: &CacheEntry) -> Option<OrderRow> {
        let Some(Entity::Order(order)) = &entry.confirmed else {
            return None;
        };
        let pending = entry.pending.as_ref();

        Some(OrderRow {
            id: id.clone(),
            customer: order.user.name.clone(),
            total: format_usd(order.total_amount),
            status: Badge::new(order.status.as_str(), status_tone(order.status)),
            selected: pending
                .and_then(|p| p.pending_status())
                .unwrap_or(order.status),
            date: format_date(order.created_at),
            updating: pending.is_some(),
        })
    }
}
