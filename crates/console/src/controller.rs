//! Optimistic mutation controller.
//!
//! Every mutation follows the same path: patch the cache, call the gateway,
//! then commit or roll back. A committed mutation is followed by a full
//! refetch unless disabled in [`ConsoleConfig`].

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::{Entity, Order, OrderStatus, Product, ProductForm, StatusUpdate};
use common::{EntityId, EntityKind};
use gateway::{GatewayRequest, RemoteGateway};
use tokio::sync::RwLock;

use crate::cache::EntityCache;
use crate::config::ConsoleConfig;
use crate::confirm::Confirm;
use crate::error::{ConsoleError, Result};
use crate::pending::PendingMutation;
use crate::state::MutationState;

/// Clears the form's in-flight flag when the submission settles.
struct SubmissionGuard<'a>(&'a AtomicBool);

impl<'a> SubmissionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ConsoleError::SubmissionInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives optimistic mutations against a [`RemoteGateway`].
///
/// The controller is the only writer of its [`EntityCache`]. At most one
/// mutation per record is in flight; mutations on different records run
/// independently and may settle in any order.
pub struct MutationController<G: RemoteGateway> {
    gateway: G,
    cache: EntityCache,
    states: Arc<RwLock<HashMap<EntityId, MutationState>>>,
    creating: AtomicBool,
    config: ConsoleConfig,
}

impl<G: RemoteGateway> MutationController<G> {
    /// Creates a controller over an empty cache.
    pub fn new(gateway: G, config: ConsoleConfig) -> Self {
        Self {
            gateway,
            cache: EntityCache::new(),
            states: Arc::new(RwLock::new(HashMap::new())),
            creating: AtomicBool::new(false),
            config,
        }
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Current state of a record: `Pending` while a mutation is in flight,
    /// `Idle` otherwise.
    pub async fn state(&self, id: &EntityId) -> MutationState {
        match self.states.read().await.get(id) {
            Some(MutationState::Pending) => MutationState::Pending,
            _ => MutationState::Idle,
        }
    }

    /// How the last mutation on a record settled, if any has.
    pub async fn last_outcome(&self, id: &EntityId) -> Option<MutationState> {
        self.states
            .read()
            .await
            .get(id)
            .copied()
            .filter(MutationState::is_settled)
    }

    /// Returns true while a product form submission is outstanding.
    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::Acquire)
    }

    /// Submits the product form as-is and shows a provisional card meanwhile.
    ///
    /// Numeric fields are converted by the backend; a malformed form comes
    /// back as a 400 and is rolled back like any other failure.
    #[tracing::instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product> {
        let _guard = SubmissionGuard::acquire(&self.creating)?;

        let request = GatewayRequest::create(EntityKind::Product, form)?;
        let provisional = EntityId::provisional();
        let preview = Product::preview(provisional.clone(), form);

        let created = self
            .run(PendingMutation::create(Entity::Product(preview)), request)
            .await?
            .ok_or(ConsoleError::EntityNotFound(provisional))?;

        Ok(created.into_product()?)
    }

    /// Replaces a record with `entity`.
    #[tracing::instrument(skip(self, entity), fields(id = %entity.id(), kind = %entity.kind()))]
    pub async fn update(&self, entity: Entity) -> Result<Entity> {
        let id = entity.id().clone();
        let request = GatewayRequest::update(entity.kind(), id.clone(), &entity)?;

        self.run(PendingMutation::update(entity), request)
            .await?
            .ok_or(ConsoleError::EntityNotFound(id))
    }

    /// Moves an order to `status`.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_status(&self, id: &EntityId, status: OrderStatus) -> Result<Order> {
        match self.cache.get(id).await {
            None => return Err(ConsoleError::EntityNotFound(id.clone())),
            Some(Entity::Order(_)) => {}
            Some(_) => return Err(ConsoleError::NotAnOrder(id.clone())),
        }

        let request =
            GatewayRequest::patch(EntityKind::Order, id.clone(), &StatusUpdate { status })?;
        let order = self
            .run(PendingMutation::status_change(id.clone(), status), request)
            .await?
            .ok_or_else(|| ConsoleError::EntityNotFound(id.clone()))?;

        Ok(order.into_order()?)
    }

    /// Deletes a record once the operator confirms.
    ///
    /// Declining issues no request and leaves the cache untouched. The record
    /// stays visible, flagged as deleting, until the backend confirms.
    #[tracing::instrument(skip(self, confirm))]
    pub async fn delete<C: Confirm + ?Sized>(
        &self,
        kind: EntityKind,
        id: &EntityId,
        confirm: &C,
    ) -> Result<()> {
        match self.cache.entry(id).await {
            None => return Err(ConsoleError::EntityNotFound(id.clone())),
            Some(entry) if entry.is_pending() => {
                return Err(ConsoleError::MutationInFlight(id.clone()));
            }
            Some(entry) => match entry.kind() {
                Some(actual) if actual != kind => {
                    return Err(ConsoleError::KindMismatch {
                        id: id.clone(),
                        expected: kind,
                        actual,
                    });
                }
                _ => {}
            },
        }

        let prompt = format!(
            "Are you sure you want to delete this {}?",
            kind.as_str().to_lowercase()
        );
        if !confirm.confirm(&prompt) {
            tracing::info!(%id, %kind, "delete cancelled at the confirmation prompt");
            return Err(ConsoleError::ConfirmationAborted);
        }

        self.run(
            PendingMutation::delete(kind, id.clone()),
            GatewayRequest::delete(kind, id.clone()),
        )
        .await?;
        Ok(())
    }

    /// Reloads every collection from the backend.
    ///
    /// Each kind is reloaded independently; the first failure is returned
    /// after the others have been attempted.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let mut first_error = None;

        for kind in EntityKind::ALL {
            match self.gateway.list(kind).await {
                Ok(entities) => {
                    tracing::debug!(%kind, count = entities.len(), "collection reloaded");
                    self.cache.reload(kind, entities).await;
                }
                Err(e) => {
                    tracing::warn!(%kind, error = %e, "failed to reload collection");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Applies `pending`, sends `request`, then commits or rolls back.
    async fn run(
        &self,
        pending: PendingMutation,
        request: GatewayRequest,
    ) -> Result<Option<Entity>> {
        let id = pending.entity_id.clone();
        let kind = pending.entity_kind;
        let mutation = pending.kind;

        if !self.state(&id).await.can_begin() {
            return Err(ConsoleError::MutationInFlight(id));
        }
        self.cache.apply_optimistic(pending).await?;
        self.states
            .write()
            .await
            .insert(id.clone(), MutationState::Pending);
        metrics::counter!("console_mutations_total", "mutation" => mutation.as_str())
            .increment(1);

        match self.gateway.submit(request).await {
            Ok(server) => {
                let committed = self.cache.commit(&id, server).await;
                let settled_id = committed
                    .as_ref()
                    .map_or_else(|| id.clone(), |e| e.id().clone());
                self.settle(&id, settled_id.clone(), MutationState::Committed)
                    .await;
                tracing::info!(id = %settled_id, %kind, %mutation, "mutation committed");

                if self.config.refetch_after_commit {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "refresh after commit failed");
                    }
                }
                Ok(committed)
            }
            Err(e) => {
                self.cache.rollback(&id).await;
                self.settle(&id, id.clone(), MutationState::RolledBack)
                    .await;
                metrics::counter!("console_rollbacks_total", "mutation" => mutation.as_str())
                    .increment(1);
                tracing::error!(%id, %kind, %mutation, error = %e, "mutation rolled back");
                Err(e.into())
            }
        }
    }

    async fn settle(&self, id: &EntityId, settled_id: EntityId, outcome: MutationState) {
        let mut states = self.states.write().await;
        let previous = states.remove(id).unwrap_or_default();
        if !previous.can_settle() {
            tracing::warn!(%id, state = %previous, "settling a mutation that was not pending");
        }
        states.insert(settled_id, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Category, Money, OrderCustomer};
    use chrono::Utc;
    use gateway::InMemoryGateway;

    fn controller(gateway: InMemoryGateway) -> MutationController<InMemoryGateway> {
        MutationController::new(
            gateway,
            ConsoleConfig {
                refetch_after_commit: false,
                ..Default::default()
            },
        )
    }

    fn order(status: OrderStatus) -> Order {
        Order {
            id: EntityId::new("order-42"),
            user: OrderCustomer {
                name: "Ayesha".to_string(),
            },
            total_amount: Money::from_dollars(30),
            status,
            created_at: Utc::now(),
        }
    }

    fn urea() -> Product {
        Product {
            id: EntityId::new("prod-7"),
            name: "Urea".to_string(),
            description: String::new(),
            price: Money::from_dollars(20),
            quantity: 3,
            category: Category::Fertilizer,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_status_change_commits() {
        let gateway = InMemoryGateway::new();
        gateway.seed(order(OrderStatus::Pending)).await;
        let controller = controller(gateway.clone());
        controller.refresh().await.unwrap();

        let id = EntityId::new("order-42");
        let updated = controller
            .update_order_status(&id, OrderStatus::Paid)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(controller.state(&id).await, MutationState::Idle);
        assert_eq!(
            controller.last_outcome(&id).await,
            Some(MutationState::Committed)
        );
    }

    #[tokio::test]
    async fn test_status_change_on_product_is_rejected() {
        let gateway = InMemoryGateway::new();
        gateway.seed(urea()).await;
        let controller = controller(gateway.clone());
        controller.refresh().await.unwrap();

        let err = controller
            .update_order_status(&EntityId::new("prod-7"), OrderStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::NotAnOrder(_)));
        assert_eq!(gateway.mutation_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_record() {
        let controller = controller(InMemoryGateway::new());
        let err = controller
            .delete(
                EntityKind::Product,
                &EntityId::new("nope"),
                &crate::AlwaysConfirm(true),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_wrong_kind_is_rejected() {
        let gateway = InMemoryGateway::new();
        gateway.seed(urea()).await;
        let controller = controller(gateway.clone());
        controller.refresh().await.unwrap();

        let asked = std::sync::atomic::AtomicBool::new(false);
        let confirm = |_: &str| {
            asked.store(true, Ordering::SeqCst);
            true
        };
        let err = controller
            .delete(EntityKind::Order, &EntityId::new("prod-7"), &confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::KindMismatch {
                expected: EntityKind::Order,
                actual: EntityKind::Product,
                ..
            }
        ));
        assert!(!asked.load(Ordering::SeqCst));
        assert_eq!(gateway.mutation_count().await, 0);
        assert!(controller.cache().get(&EntityId::new("prod-7")).await.is_some());
    }

    #[tokio::test]
    async fn test_confirm_prompt_names_the_kind() {
        let gateway = InMemoryGateway::new();
        gateway.seed(urea()).await;
        let controller = controller(gateway);
        controller.refresh().await.unwrap();

        let asked = std::sync::Mutex::new(String::new());
        let confirm = |message: &str| {
            *asked.lock().unwrap() = message.to_string();
            false
        };
        let _ = controller
            .delete(EntityKind::Product, &EntityId::new("prod-7"), &confirm)
            .await;
        assert_eq!(
            *asked.lock().unwrap(),
            "Are you sure you want to delete this product?"
        );
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let gateway = InMemoryGateway::new();
        gateway.seed(urea()).await;
        let controller = controller(gateway.clone());
        controller.refresh().await.unwrap();

        let mut product = urea();
        product.quantity = 9;
        let updated = controller.update(Entity::Product(product)).await.unwrap();
        assert_eq!(updated.as_product().unwrap().quantity, 9);
        let stored = gateway
            .get(EntityKind::Product, &EntityId::new("prod-7"))
            .await
            .unwrap();
        assert_eq!(stored.as_product().unwrap().quantity, 9);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_returned() {
        let gateway = InMemoryGateway::new();
        gateway.set_fail_on_list(Some(503)).await;
        let controller = controller(gateway);

        let err = controller.refresh().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Gateway(ref g) if g.status() == Some(503)));
    }

    #[tokio::test]
    async fn test_failed_create_clears_in_flight_flag() {
        let gateway = InMemoryGateway::new();
        gateway.set_fail_on_submit(Some(500)).await;
        let controller = controller(gateway);

        let form = ProductForm {
            name: "Seed Mix".to_string(),
            price: "500".to_string(),
            quantity: "10".to_string(),
            ..Default::default()
        };
        assert!(controller.create_product(&form).await.is_err());
        assert!(!controller.is_creating());
        assert!(controller.cache().is_empty().await);
    }
}
