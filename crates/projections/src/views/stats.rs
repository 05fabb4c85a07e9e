//! Summary cards at the top of the dashboard.
//!
//! Derived from confirmed records only, so an in-flight mutation never moves
//! the totals.

use catalog::{Entity, Money};
use common::EntityKind;
use console::CacheSnapshot;
use serde::Serialize;

use crate::format::format_usd;
use crate::views::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatIcon {
    DollarSign,
    ShoppingCart,
    Package,
    Users,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsCard {
    pub title: &'static str,
    pub value: String,
    pub icon: StatIcon,
    pub tone: Tone,
}

fn confirmed(snapshot: &CacheSnapshot, kind: EntityKind) -> impl Iterator<Item = &Entity> {
    snapshot
        .of_kind(kind)
        .filter_map(|(_, entry)| entry.confirmed.as_ref())
}

/// Dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Sum of paid order totals.
    pub total_revenue: Money,
    pub total_orders: usize,
    pub total_products: usize,
    /// Users without the admin role.
    pub total_customers: usize,
}

impl StatsSummary {
    pub fn from_snapshot(snapshot: &CacheSnapshot) -> Self {
        let mut summary = Self::default();
        for entity in confirmed(snapshot, EntityKind::Order) {
            if let Entity::Order(order) = entity {
                summary.total_orders += 1;
                if order.is_paid() {
                    summary.total_revenue += order.total_amount;
                }
            }
        }
        summary.total_products = confirmed(snapshot, EntityKind::Product).count();
        summary.total_customers = confirmed(snapshot, EntityKind::User)
            .filter(|e| e.as_user().is_some_and(|u| !u.role.is_admin()))
            .count();
        summary
    }

    /// The four cards, in display order.
    pub fn cards(&self) -> Vec<StatsCard> {
        vec![
            StatsCard {
                title: "Total Revenue",
                value: format_usd(self.total_revenue),
                icon: StatIcon::DollarSign,
                tone: Tone::Blue,
            },
            StatsCard {
                title: "Total Orders",
                value: self.total_orders.to_string(),
                icon: StatIcon::ShoppingCart,
                tone: Tone::Green,
            },
            StatsCard {
                title: "Total Products",
                value: self.total_products.to_string(),
                icon: StatIcon::Package,
                tone: Tone::Purple,
            },
            StatsCard {
                title: "Total Customers",
                value: self.total_customers.to_string(),
                icon: StatIcon::Users,
                tone: Tone::Orange,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Order, OrderCustomer, OrderStatus, Role, User, UserCounts};
    use chrono::Utc;
    use common::EntityId;
    use console::{EntityCache, PendingMutation};

    fn order(id: &str, cents: i64, status: OrderStatus) -> Entity {
        Entity::Order(Order {
            id: EntityId::new(id),
            user: OrderCustomer {
                name: "Ayesha".to_string(),
            },
            total_amount: Money::from_cents(cents),
            status,
            created_at: Utc::now(),
        })
    }

    fn user(id: &str, role: Role) -> Entity {
        Entity::User(User {
            id: EntityId::new(id),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            role,
            created_at: Utc::now(),
            counts: UserCounts::default(),
        })
    }

    #[tokio::test]
    async fn test_totals() {
        let cache = EntityCache::new();
        cache
            .reload(
                EntityKind::Order,
                vec![
                    order("o-1", 100_000, OrderStatus::Paid),
                    order("o-2", 50_050, OrderStatus::Paid),
                    order("o-3", 99_999, OrderStatus::Pending),
                    order("o-4", 10_000, OrderStatus::Failed),
                ],
            )
            .await;
        cache
            .reload(
                EntityKind::User,
                vec![
                    user("root", Role::Admin),
                    user("ayesha", Role::User),
                    user("grace", Role::User),
                ],
            )
            .await;

        let summary = StatsSummary::from_snapshot(&cache.snapshot().await);
        assert_eq!(summary.total_revenue, Money::from_cents(150_050));
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_customers, 2);

        let cards = summary.cards();
        assert_eq!(cards[0].value, "$1,500.50");
        assert_eq!(cards[0].tone, Tone::Blue);
        assert_eq!(cards[3].title, "Total Customers");
        assert_eq!(cards[3].tone, Tone::Orange);
    }

    #[tokio::test]
    async fn test_pending_status_does_not_count() {
        let cache = EntityCache::new();
        let id = EntityId::new("o-1");
        cache
            .set_confirmed(id.clone(), order("o-1", 2_500, OrderStatus::Pending))
            .await;
        cache
            .apply_optimistic(PendingMutation::status_change(id, OrderStatus::Paid))
            .await
            .unwrap();

        let summary = StatsSummary::from_snapshot(&cache.snapshot().await);
        assert_eq!(summary.total_revenue, Money::zero());
    }

    #[tokio::test]
    async fn test_revenue_saturates_on_huge_totals() {
        let cache = EntityCache::new();
        cache
            .reload(
                EntityKind::Order,
                vec![
                    order("o-1", i64::MAX - 10, OrderStatus::Paid),
                    order("o-2", 1_000, OrderStatus::Paid),
                ],
            )
            .await;

        let summary = StatsSummary::from_snapshot(&cache.snapshot().await);
        assert_eq!(summary.total_revenue, Money::from_cents(i64::MAX));
        assert!(summary.cards()[0].value.starts_with("$92,233,720"));
    }
}
