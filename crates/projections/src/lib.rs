//! View projections for the admin dashboard and storefront header.
//!
//! Everything here is a pure function of a [`console::CacheSnapshot`] (or of
//! the session, for the header):
//! - [`DashboardView`] with stats cards, product cards, order and user rows
//! - [`HeaderView`] with navigation, account menu, cart badge and theme
//! - [`format_usd`] and [`format_date`] for en-US display

pub mod dashboard;
pub mod format;
pub mod projection;
pub mod views;

pub use dashboard::DashboardView;
pub use format::{format_date, format_usd};
pub use projection::Projection;
pub use views::{
    AccountMenu, Badge, HeaderView, MenuEntry, NavLink, OrderRow, OrdersTable, ProductCard,
    ProductGrid, StatIcon, StatsCard, StatsSummary, Tone, UserRow, UsersTable,
};
