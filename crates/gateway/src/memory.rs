//! In-process simulation of the admin backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use catalog::{CartItem, Entity, Product, ProductForm};
use common::{EntityId, EntityKind};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::request::{cart_path, collection_path};
use crate::{CartQuery, GatewayError, GatewayRequest, Operation, RemoteGateway, Result};

/// A call observed by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub operation: Operation,
    pub target: String,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    collections: HashMap<EntityKind, IndexMap<EntityId, Entity>>,
    carts: HashMap<EntityId, Vec<CartItem>>,
    /// Only kept when built with [`InMemoryGateway::with_call_log`].
    calls: Option<Vec<GatewayCall>>,
    mutations: usize,
    fail_on_submit: Option<u16>,
    fail_on_list: Option<u16>,
}

impl InMemoryBackendState {
    fn collection(&mut self, kind: EntityKind) -> &mut IndexMap<EntityId, Entity> {
        self.collections.entry(kind).or_default()
    }

    fn record(&mut self, operation: Operation, target: &str) {
        if operation.is_mutation() {
            self.mutations += 1;
        }
        if let Some(calls) = &mut self.calls {
            calls.push(GatewayCall {
                operation,
                target: target.to_string(),
            });
        }
    }
}

/// Backend simulator with the same observable behavior as the admin API.
///
/// Ids are assigned server-side, product forms are converted from their raw
/// strings here, unknown ids answer 404 and undecodable bodies answer 400.
/// Failures can be injected per call family. Individual calls are only
/// retained when the log is switched on with [`InMemoryGateway::with_call_log`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<RwLock<InMemoryBackendState>>,
}

impl InMemoryGateway {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend that keeps every call it receives.
    pub fn with_call_log() -> Self {
        let state = InMemoryBackendState {
            calls: Some(Vec::new()),
            ..Default::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Inserts a record as if it had always existed.
    pub async fn seed(&self, entity: impl Into<Entity>) {
        let entity = entity.into();
        let mut state = self.state.write().await;
        state
            .collection(entity.kind())
            .insert(entity.id().clone(), entity);
    }

    /// Replaces a user's cart lines.
    pub async fn seed_cart(&self, user_id: EntityId, items: Vec<CartItem>) {
        self.state.write().await.carts.insert(user_id, items);
    }

    /// Makes every mutation answer with `status` until cleared with `None`.
    pub async fn set_fail_on_submit(&self, status: Option<u16>) {
        self.state.write().await.fail_on_submit = status;
    }

    /// Makes every list call answer with `status` until cleared with `None`.
    pub async fn set_fail_on_list(&self, status: Option<u16>) {
        self.state.write().await.fail_on_list = status;
    }

    /// Returns a stored record.
    pub async fn get(&self, kind: EntityKind, id: &EntityId) -> Option<Entity> {
        let state = self.state.read().await;
        state.collections.get(&kind).and_then(|c| c.get(id)).cloned()
    }

    /// Number of stored records of one kind.
    pub async fn count(&self, kind: EntityKind) -> usize {
        let state = self.state.read().await;
        state.collections.get(&kind).map_or(0, |c| c.len())
    }

    /// Every call received so far, oldest first. Empty unless the backend
    /// was built with [`InMemoryGateway::with_call_log`].
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.read().await.calls.clone().unwrap_or_default()
    }

    /// Number of mutations received so far.
    pub async fn mutation_count(&self) -> usize {
        self.state.read().await.mutations
    }
}

fn rejected(operation: Operation, target: &str, status: u16, body: impl Into<String>) -> GatewayError {
    GatewayError::Status {
        operation,
        target: target.to_string(),
        status,
        body: body.into(),
    }
}

fn missing_id(operation: Operation, target: &str) -> GatewayError {
    rejected(operation, target, 400, "missing record id")
}

/// Overlays the top-level fields of `patch` onto `current`.
fn merge(current: &Entity, patch: &serde_json::Value) -> std::result::Result<Entity, String> {
    let mut value = current.to_json().map_err(|e| e.to_string())?;
    let (Some(target), Some(fields)) = (value.as_object_mut(), patch.as_object()) else {
        return Err("patch body must be a JSON object".to_string());
    };
    for (key, field) in fields {
        if key != "id" {
            target.insert(key.clone(), field.clone());
        }
    }
    Entity::from_json(current.kind(), value).map_err(|e| e.to_string())
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn submit(&self, request: GatewayRequest) -> Result<Option<Entity>> {
        let target = request.path();
        let operation = request.operation;
        let mut state = self.state.write().await;
        state.record(operation, &target);

        if let Some(status) = state.fail_on_submit {
            return Err(rejected(operation, &target, status, "injected failure"));
        }

        let payload = request.payload.unwrap_or(serde_json::Value::Null);
        let collection = state.collection(request.kind);

        match operation {
            Operation::Create => {
                if request.kind != EntityKind::Product {
                    return Err(rejected(operation, &target, 405, "method not allowed"));
                }
                let form: ProductForm = serde_json::from_value(payload)
                    .map_err(|e| rejected(operation, &target, 400, e.to_string()))?;
                let product = Product::from_form(EntityId::generate(), &form)
                    .map_err(|e| rejected(operation, &target, 400, e.to_string()))?;
                let entity = Entity::Product(product);
                collection.insert(entity.id().clone(), entity.clone());
                Ok(Some(entity))
            }
            Operation::Update => {
                let id = request.id.ok_or_else(|| missing_id(operation, &target))?;
                if !collection.contains_key(&id) {
                    return Err(rejected(operation, &target, 404, "not found"));
                }
                let entity = Entity::from_json(request.kind, payload)
                    .map_err(|e| rejected(operation, &target, 400, e.to_string()))?
                    .with_id(id.clone());
                collection.insert(id, entity.clone());
                Ok(Some(entity))
            }
            Operation::Patch => {
                let id = request.id.ok_or_else(|| missing_id(operation, &target))?;
                let current = collection
                    .get(&id)
                    .ok_or_else(|| rejected(operation, &target, 404, "not found"))?;
                let entity = merge(current, &payload)
                    .map_err(|message| rejected(operation, &target, 400, message))?;
                collection.insert(id, entity.clone());
                Ok(Some(entity))
            }
            Operation::Delete => {
                let id = request.id.ok_or_else(|| missing_id(operation, &target))?;
                collection
                    .shift_remove(&id)
                    .ok_or_else(|| rejected(operation, &target, 404, "not found"))?;
                Ok(None)
            }
            Operation::List | Operation::CartQuery => {
                Err(rejected(operation, &target, 405, "method not allowed"))
            }
        }
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let target = collection_path(kind);
        let mut state = self.state.write().await;
        state.record(Operation::List, &target);

        if let Some(status) = state.fail_on_list {
            return Err(rejected(Operation::List, &target, status, "injected failure"));
        }

        Ok(state.collection(kind).values().cloned().collect())
    }
}

#[async_trait]
impl CartQuery for InMemoryGateway {
    async fn cart_items(&self, user_id: &EntityId) -> Result<Vec<CartItem>> {
        let mut state = self.state.write().await;
        state.record(Operation::CartQuery, &cart_path(user_id));
        Ok(state.carts.get(user_id).cloned().unwrap_or_default())
    }
}
