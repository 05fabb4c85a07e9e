//! The full admin dashboard, projected in one pass.

use console::CacheSnapshot;
use serde::Serialize;

use crate::projection::Projection;
use crate::views::{
    OrderRow, OrdersTable, ProductCard, ProductGrid, StatsCard, StatsSummary, UserRow, UsersTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub stats: Vec<StatsCard>,
    pub products: Vec<ProductCard>,
    pub orders: Vec<OrderRow>,
    pub users: Vec<UserRow>,
}

impl DashboardView {
    pub fn project(snapshot: &CacheSnapshot) -> Self {
        Self {
            stats: StatsSummary::from_snapshot(snapshot).cards(),
            products: ProductGrid::rows(snapshot),
            orders: OrdersTable::rows(snapshot),
            users: UsersTable::rows(snapshot),
        }
    }
}
