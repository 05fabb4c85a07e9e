//! The record union the console caches.

use common::{EntityId, EntityKind};
use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::order::Order;
use crate::product::Product;
use crate::user::User;

/// A record owned by the remote store.
///
/// The backend serves each kind from its own collection without a type tag,
/// so decoding needs the kind up front (see [`Entity::from_json`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Product(Product),
    Order(Order),
    User(User),
}

impl Entity {
    /// Decodes a record served from the collection of `kind`.
    pub fn from_json(kind: EntityKind, value: serde_json::Value) -> Result<Self> {
        Ok(match kind {
            EntityKind::Product => Entity::Product(serde_json::from_value(value)?),
            EntityKind::Order => Entity::Order(serde_json::from_value(value)?),
            EntityKind::User => Entity::User(serde_json::from_value(value)?),
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Product(p) => &p.id,
            Entity::Order(o) => &o.id,
            Entity::User(u) => &u.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Product(_) => EntityKind::Product,
            Entity::Order(_) => EntityKind::Order,
            Entity::User(_) => EntityKind::User,
        }
    }

    /// Returns a copy re-keyed under `id`.
    pub fn with_id(&self, id: EntityId) -> Self {
        let mut entity = self.clone();
        match &mut entity {
            Entity::Product(p) => p.id = id,
            Entity::Order(o) => o.id = id,
            Entity::User(u) => u.id = id,
        }
        entity
    }

    pub fn as_product(&self) -> Option<&Product> {
        match self {
            Entity::Product(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<&Order> {
        match self {
            Entity::Order(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Entity::User(u) => Some(u),
            _ => None,
        }
    }

    /// Unwraps a product, or reports what was found instead.
    pub fn into_product(self) -> Result<Product> {
        match self {
            Entity::Product(p) => Ok(p),
            other => Err(CatalogError::KindMismatch {
                expected: EntityKind::Product,
                actual: other.kind(),
            }),
        }
    }

    /// Unwraps an order, or reports what was found instead.
    pub fn into_order(self) -> Result<Order> {
        match self {
            Entity::Order(o) => Ok(o),
            other => Err(CatalogError::KindMismatch {
                expected: EntityKind::Order,
                actual: other.kind(),
            }),
        }
    }
}

impl From<Product> for Entity {
    fn from(p: Product) -> Self {
        Entity::Product(p)
    }
}

impl From<Order> for Entity {
    fn from(o: Order) -> Self {
        Entity::Order(o)
    }
}

impl From<User> for Entity {
    fn from(u: User) -> Self {
        Entity::User(u)
    }
}
