use std::sync::Arc;

use async_trait::async_trait;
use catalog::{CartItem, Entity};
use common::{EntityId, EntityKind};

use crate::{GatewayRequest, Result};

/// Boundary to the backend that owns every record.
///
/// Implementations must not retry: each failure is reported exactly once
/// and the caller decides what to do with it.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Sends a mutation.
    ///
    /// Returns the record the backend answered with, or `None` for an empty
    /// body (deletes always yield `None`).
    async fn submit(&self, request: GatewayRequest) -> Result<Option<Entity>>;

    /// Lists every record of one kind, in backend order.
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>>;
}

/// Reads a user's cart lines.
#[async_trait]
pub trait CartQuery: Send + Sync {
    async fn cart_items(&self, user_id: &EntityId) -> Result<Vec<CartItem>>;
}

#[async_trait]
impl<T: RemoteGateway + ?Sized> RemoteGateway for Arc<T> {
    async fn submit(&self, request: GatewayRequest) -> Result<Option<Entity>> {
        (**self).submit(request).await
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        (**self).list(kind).await
    }
}

#[async_trait]
impl<T: CartQuery + ?Sized> CartQuery for Arc<T> {
    async fn cart_items(&self, user_id: &EntityId) -> Result<Vec<CartItem>> {
        (**self).cart_items(user_id).await
    }
}
