//! Users table of the dashboard.

use catalog::{Entity, Role};
use common::{EntityId, EntityKind};
use console::CacheEntry;
use serde::Serialize;

use crate::format::format_date;
use crate::projection::Projection;
use crate::views::{Badge, Tone};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Badge,
    pub orders: u32,
    pub cart_items: u32,
    pub joined: String,
}

pub fn role_tone(role: Role) -> Tone {
    if role.is_admin() {
        Tone::Purple
    } else {
        Tone::Blue
    }
}

pub struct UsersTable;

impl Projection for UsersTable {
    const NAME: &'static str = "users";
    const KIND: EntityKind = EntityKind::User;
    type Row = UserRow;

    fn row(id: &EntityId, entry: &CacheEntry) -> Option<UserRow> {
        let Entity::User(user) = entry.effective()? else {
            return None;
        };

        Some(UserRow {
            id: id.clone(),
            role: Badge::new(user.role.as_str(), role_tone(user.role)),
            orders: user.counts.orders,
            cart_items: user.counts.cart_items,
            joined: format_date(user.created_at),
            name: user.name,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{User, UserCounts};
    use chrono::{TimeZone, Utc};
    use console::EntityCache;

    fn user(id: &str, role: Role) -> Entity {
        Entity::User(User {
            id: EntityId::new(id),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role,
            created_at: Utc.with_ymd_and_hms(2023, 11, 2, 8, 0, 0).unwrap(),
            counts: UserCounts {
                orders: 4,
                cart_items: 2,
            },
        })
    }

    #[tokio::test]
    async fn test_user_rows() {
        let cache = EntityCache::new();
        cache
            .reload(
                EntityKind::User,
                vec![user("u-1", Role::Admin), user("u-2", Role::User)],
            )
            .await;

        let rows = UsersTable::rows(&cache.snapshot().await);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, Badge::new("ADMIN", Tone::Purple));
        assert_eq!(rows[1].role, Badge::new("USER", Tone::Blue));
        assert_eq!(rows[1].orders, 4);
        assert_eq!(rows[1].cart_items, 2);
        assert_eq!(rows[1].joined, "11/2/2023");
    }
}
