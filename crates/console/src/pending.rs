//! Optimistic patches waiting for the backend.

use catalog::{Entity, OrderStatus};
use chrono::{DateTime, Utc};
use common::{EntityId, EntityKind};

/// What the user asked the backend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    StatusChange,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
            MutationKind::StatusChange => "status_change",
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The local change shown while a mutation is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityPatch {
    /// A record that does not exist on the backend yet.
    Create(Entity),
    /// Full replacement of the confirmed record.
    Replace(Entity),
    /// New order status; everything else stays confirmed.
    Status(OrderStatus),
    /// Removal; the record stays visible until the backend confirms.
    Delete,
}

impl EntityPatch {
    /// Applies the patch over the confirmed value.
    pub fn apply(&self, confirmed: Option<&Entity>) -> Option<Entity> {
        match self {
            EntityPatch::Create(entity) | EntityPatch::Replace(entity) => Some(entity.clone()),
            EntityPatch::Status(status) => confirmed.map(|entity| match entity {
                Entity::Order(order) => Entity::Order(order.with_status(*status)),
                other => other.clone(),
            }),
            EntityPatch::Delete => confirmed.cloned(),
        }
    }
}

/// A mutation in flight for one record. Removed as soon as it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub entity_id: EntityId,
    pub entity_kind: EntityKind,
    pub kind: MutationKind,
    pub submitted_at: DateTime<Utc>,
    pub patch: EntityPatch,
}

impl PendingMutation {
    /// Creation of `entity`, keyed by its (provisional) id.
    pub fn create(entity: Entity) -> Self {
        Self {
            entity_id: entity.id().clone(),
            entity_kind: entity.kind(),
            kind: MutationKind::Create,
            submitted_at: Utc::now(),
            patch: EntityPatch::Create(entity),
        }
    }

    /// Full replacement of the record with `entity`.
    pub fn update(entity: Entity) -> Self {
        Self {
            entity_id: entity.id().clone(),
            entity_kind: entity.kind(),
            kind: MutationKind::Update,
            submitted_at: Utc::now(),
            patch: EntityPatch::Replace(entity),
        }
    }

    /// Status change of an order.
    pub fn status_change(order_id: EntityId, status: OrderStatus) -> Self {
        Self {
            entity_id: order_id,
            entity_kind: EntityKind::Order,
            kind: MutationKind::StatusChange,
            submitted_at: Utc::now(),
            patch: EntityPatch::Status(status),
        }
    }

    /// Deletion of a record.
    pub fn delete(entity_kind: EntityKind, entity_id: EntityId) -> Self {
        Self {
            entity_id,
            entity_kind,
            kind: MutationKind::Delete,
            submitted_at: Utc::now(),
            patch: EntityPatch::Delete,
        }
    }

    /// The status this mutation will set, for status changes.
    pub fn pending_status(&self) -> Option<OrderStatus> {
        match self.patch {
            EntityPatch::Status(status) => Some(status),
            _ => None,
        }
    }
}
