//! Demo catalog loaded on startup for local development.

use catalog::{
    CartItem, Category, Money, Order, OrderCustomer, OrderStatus, Product, ProductImage, Role,
    User, UserCounts,
};
use chrono::{Duration, Utc};
use common::EntityId;
use gateway::InMemoryGateway;

fn product(id: &str, name: &str, cents: i64, quantity: u32, category: Category) -> Product {
    Product {
        id: EntityId::new(id),
        name: name.to_string(),
        description: format!("{name} from the Vivigro catalog"),
        price: Money::from_cents(cents),
        quantity,
        category,
        images: vec![ProductImage {
            url: format!("/images/{id}.jpg"),
        }],
    }
}

/// Seeds a handful of products, orders, users and one cart.
pub async fn seed(backend: &InMemoryGateway) {
    let now = Utc::now();

    for p in [
        product("prod-1", "Organic Cotton Bale", 18_900, 25, Category::Textile),
        product("prod-2", "Linen Roll", 7_450, 60, Category::Textile),
        product("prod-7", "Urea 46-0-0", 4_200, 120, Category::Fertilizer),
        product("prod-8", "Potash Granules", 3_875, 0, Category::Fertilizer),
    ] {
        backend.seed(p).await;
    }

    let users = [
        ("user-admin", "Store Admin", "admin@vivigro.example", Role::Admin, 0, 0),
        ("user-1", "Ayesha Khan", "ayesha@example.com", Role::User, 2, 3),
        ("user-2", "Grace Hopper", "grace@example.com", Role::User, 1, 0),
    ];
    for (id, name, email, role, orders, cart_items) in users {
        backend
            .seed(User {
                id: EntityId::new(id),
                name: name.to_string(),
                email: email.to_string(),
                role,
                created_at: now - Duration::days(90),
                counts: UserCounts { orders, cart_items },
            })
            .await;
    }

    let orders = [
        ("order-41", "Ayesha Khan", 37_800, OrderStatus::Paid, 12),
        ("order-42", "Ayesha Khan", 12_600, OrderStatus::Pending, 2),
        ("order-43", "Grace Hopper", 7_450, OrderStatus::Failed, 1),
    ];
    for (id, customer, cents, status, days_ago) in orders {
        backend
            .seed(Order {
                id: EntityId::new(id),
                user: OrderCustomer {
                    name: customer.to_string(),
                },
                total_amount: Money::from_cents(cents),
                status,
                created_at: now - Duration::days(days_ago),
            })
            .await;
    }

    backend
        .seed_cart(
            EntityId::new("user-1"),
            vec![
                CartItem {
                    id: EntityId::new("line-1"),
                    product_id: EntityId::new("prod-7"),
                    quantity: 2,
                },
                CartItem {
                    id: EntityId::new("line-2"),
                    product_id: EntityId::new("prod-2"),
                    quantity: 1,
                },
            ],
        )
        .await;

    tracing::info!("demo fixtures loaded");
}
