//! Integration tests for the optimistic mutation flow.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog::{
    CartItem, Category, Entity, Money, Order, OrderCustomer, OrderStatus, Product, Role,
};
use chrono::Utc;
use common::{EntityId, EntityKind};
use console::{
    AdminConsole, AlwaysConfirm, ConsoleConfig, ConsoleError, MutationState, SessionHandle,
    SessionUser, ThemeHandle,
};
use gateway::{GatewayRequest, InMemoryGateway, RemoteGateway};
use tokio::sync::Semaphore;

/// Holds every mutation at a gate until the test opens it.
#[derive(Clone)]
struct GatedGateway {
    inner: InMemoryGateway,
    gate: Arc<Semaphore>,
    entered: Arc<AtomicUsize>,
}

impl GatedGateway {
    fn new(inner: InMemoryGateway) -> Self {
        Self {
            inner,
            gate: Arc::new(Semaphore::new(0)),
            entered: Arc::new(AtomicUsize::new(0)),
        }
    }

    async fn wait_for_entered(&self, count: usize) {
        while self.entered.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }

    fn open(&self, permits: usize) {
        self.gate.add_permits(permits);
    }
}

#[async_trait]
impl RemoteGateway for GatedGateway {
    async fn submit(&self, request: GatewayRequest) -> gateway::Result<Option<Entity>> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.gate
            .acquire()
            .await
            .expect("gate is never closed")
            .forget();
        self.inner.submit(request).await
    }

    async fn list(&self, kind: EntityKind) -> gateway::Result<Vec<Entity>> {
        self.inner.list(kind).await
    }
}

fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: EntityId::new(id),
        user: OrderCustomer {
            name: "Ayesha Khan".to_string(),
        },
        total_amount: Money::from_cents(12_550),
        status,
        created_at: Utc::now(),
    }
}

fn product(id: &str, name: &str) -> Product {
    Product {
        id: EntityId::new(id),
        name: name.to_string(),
        description: "Granular nitrogen fertilizer".to_string(),
        price: Money::from_dollars(20),
        quantity: 40,
        category: Category::Fertilizer,
        images: vec![],
    }
}

fn shopper() -> SessionUser {
    SessionUser {
        id: EntityId::new("user-1"),
        name: Some("Ayesha Khan".to_string()),
        email: Some("ayesha@example.com".to_string()),
        role: Role::User,
    }
}

async fn seeded_backend() -> InMemoryGateway {
    let backend = InMemoryGateway::new();
    backend.seed(product("prod-7", "Urea")).await;
    backend.seed(order("order-42", OrderStatus::Pending)).await;
    backend
}

async fn loaded_console<G: RemoteGateway>(gateway: G) -> AdminConsole<G> {
    let console = AdminConsole::new(
        gateway,
        SessionHandle::anonymous(),
        ThemeHandle::default(),
        ConsoleConfig::default(),
    );
    console.load().await.unwrap();
    console
}

#[tokio::test]
async fn test_create_product_from_form() {
    let backend = InMemoryGateway::new();
    let console = loaded_console(backend.clone()).await;

    console
        .edit_form(|form| {
            form.name = "Seed Mix".to_string();
            form.price = "500".to_string();
            form.quantity = "10".to_string();
            form.category = Category::Fertilizer;
        })
        .await;

    let created = console.submit_product_form().await.unwrap();
    assert!(!created.id.is_provisional());
    assert_eq!(created.price, Money::from_dollars(500));
    assert_eq!(created.quantity, 10);

    let snapshot = console.snapshot().await;
    let products: Vec<_> = snapshot.of_kind(EntityKind::Product).collect();
    assert_eq!(products.len(), 1);
    let (id, entry) = products[0];
    assert_eq!(*id, created.id);
    assert!(entry.pending.is_none());
    assert_eq!(entry.confirmed, Some(Entity::Product(created.clone())));

    assert!(console.form().await.is_empty());
    assert_eq!(backend.count(EntityKind::Product).await, 1);
}

#[tokio::test]
async fn test_failed_create_keeps_form() {
    let backend = InMemoryGateway::new();
    let console = loaded_console(backend.clone()).await;
    console
        .edit_form(|form| {
            form.name = "Seed Mix".to_string();
            form.price = "five hundred".to_string();
            form.quantity = "10".to_string();
        })
        .await;

    let err = console.submit_product_form().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Gateway(ref e) if e.status() == Some(400)));
    assert_eq!(console.form().await.name, "Seed Mix");
    assert!(console.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_rejected_status_change_rolls_back() {
    let backend = seeded_backend().await;
    let console = loaded_console(backend.clone()).await;
    let id = EntityId::new("order-42");
    let before = console.controller().cache().entry(&id).await.unwrap();

    backend.set_fail_on_submit(Some(500)).await;
    let err = console
        .update_order_status(&id, OrderStatus::Paid)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Gateway(ref e) if e.status() == Some(500)));

    let after = console.controller().cache().entry(&id).await.unwrap();
    assert_eq!(after, before);
    let shown = console.controller().cache().get(&id).await.unwrap();
    assert_eq!(shown.as_order().unwrap().status, OrderStatus::Pending);
    assert_eq!(
        console.controller().last_outcome(&id).await,
        Some(MutationState::RolledBack)
    );
    assert_eq!(console.controller().state(&id).await, MutationState::Idle);
}

#[tokio::test]
async fn test_declined_delete_issues_no_request() {
    let backend = seeded_backend().await;
    let console = loaded_console(backend.clone()).await;
    let before = console.snapshot().await;

    let err = console
        .delete_product(&EntityId::new("prod-7"), &AlwaysConfirm(false))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::ConfirmationAborted));
    assert_eq!(backend.mutation_count().await, 0);
    assert_eq!(console.snapshot().await, before);
}

#[tokio::test]
async fn test_confirmed_delete_removes_record() {
    let backend = seeded_backend().await;
    let console = loaded_console(backend.clone()).await;
    let id = EntityId::new("prod-7");

    let confirm = |_: &str| true;
    console.delete_product(&id, &confirm).await.unwrap();

    assert!(console.snapshot().await.get(&id).is_none());
    assert!(backend.get(EntityKind::Product, &id).await.is_none());
    assert_eq!(
        console.controller().last_outcome(&id).await,
        Some(MutationState::Committed)
    );
}

#[tokio::test]
async fn test_mutations_on_distinct_records_overlap() {
    let backend = seeded_backend().await;
    let gated = GatedGateway::new(backend.clone());
    let console = loaded_console(gated.clone()).await;
    let controller = console.controller();
    let order_id = EntityId::new("order-42");
    let product_id = EntityId::new("prod-7");
    let confirm = AlwaysConfirm(true);

    let run = async {
        tokio::join!(
            controller.update_order_status(&order_id, OrderStatus::Paid),
            controller.delete(EntityKind::Product, &product_id, &confirm),
            async {
                gated.wait_for_entered(2).await;
                assert_eq!(controller.state(&order_id).await, MutationState::Pending);
                assert_eq!(controller.state(&product_id).await, MutationState::Pending);
                gated.open(2);
            },
        )
    };

    let (status, delete, ()) = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("mutations never settled");
    assert_eq!(status.unwrap().status, OrderStatus::Paid);
    delete.unwrap();
    assert_eq!(backend.count(EntityKind::Product).await, 0);
}

#[tokio::test]
async fn test_second_mutation_on_pending_record_is_rejected() {
    let backend = seeded_backend().await;
    let gated = GatedGateway::new(backend.clone());
    let console = loaded_console(gated.clone()).await;
    let controller = console.controller();
    let id = EntityId::new("order-42");

    let run = async {
        tokio::join!(
            controller.update_order_status(&id, OrderStatus::Paid),
            async {
                gated.wait_for_entered(1).await;
                let second = controller
                    .update_order_status(&id, OrderStatus::Failed)
                    .await;
                gated.open(1);
                second
            },
        )
    };

    let (first, second) = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("mutation never settled");
    assert_eq!(first.unwrap().status, OrderStatus::Paid);
    assert!(matches!(second, Err(ConsoleError::MutationInFlight(ref e)) if *e == id));
    assert_eq!(backend.mutation_count().await, 1);
}

#[tokio::test]
async fn test_duplicate_form_submission_is_rejected() {
    let backend = InMemoryGateway::new();
    let gated = GatedGateway::new(backend.clone());
    let console = loaded_console(gated.clone()).await;
    console
        .edit_form(|form| {
            form.name = "Seed Mix".to_string();
            form.price = "500".to_string();
            form.quantity = "10".to_string();
        })
        .await;

    let run = async {
        tokio::join!(console.submit_product_form(), async {
            gated.wait_for_entered(1).await;
            assert!(console.controller().is_creating());
            let second = console.submit_product_form().await;
            gated.open(1);
            second
        })
    };

    let (first, second) = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("submission never settled");
    assert!(first.is_ok());
    assert!(matches!(second, Err(ConsoleError::SubmissionInFlight)));
    assert!(!console.controller().is_creating());
    assert_eq!(backend.count(EntityKind::Product).await, 1);
}

#[tokio::test]
async fn test_commit_refetches_everything() {
    let backend = seeded_backend().await;
    let console = loaded_console(backend.clone()).await;

    // Another admin adds a product behind our back.
    backend.seed(product("prod-8", "Potash")).await;

    console
        .update_order_status(&EntityId::new("order-42"), OrderStatus::Paid)
        .await
        .unwrap();

    let snapshot = console.snapshot().await;
    assert!(snapshot.get(&EntityId::new("prod-8")).is_some());
}

#[tokio::test]
async fn test_refetch_can_be_disabled() {
    let backend = seeded_backend().await;
    let console = AdminConsole::new(
        backend.clone(),
        SessionHandle::anonymous(),
        ThemeHandle::default(),
        ConsoleConfig {
            refetch_after_commit: false,
            ..Default::default()
        },
    );
    console.load().await.unwrap();
    backend.seed(product("prod-8", "Potash")).await;

    console
        .update_order_status(&EntityId::new("order-42"), OrderStatus::Paid)
        .await
        .unwrap();

    assert!(console.snapshot().await.get(&EntityId::new("prod-8")).is_none());
}

#[tokio::test]
async fn test_failed_refetch_keeps_commit() {
    let backend = seeded_backend().await;
    let console = loaded_console(backend.clone()).await;
    backend.set_fail_on_list(Some(503)).await;

    let id = EntityId::new("order-42");
    let order = console
        .update_order_status(&id, OrderStatus::Failed)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Failed);

    let confirmed = console.controller().cache().confirmed(&id).await.unwrap();
    assert_eq!(confirmed.as_order().unwrap().status, OrderStatus::Failed);
}

#[tokio::test]
async fn test_cart_badge_follows_session() {
    let backend = InMemoryGateway::new();
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
                    product_id: EntityId::new("prod-8"),
                    quantity: 3,
                },
            ],
        )
        .await;
    let console = loaded_console(backend.clone()).await;

    assert_eq!(console.cart_badge(&backend).await.unwrap(), 0);

    console.session().sign_in(shopper());
    assert_eq!(console.cart_badge(&backend).await.unwrap(), 5);
}
