//! Entity cache: confirmed server state plus at most one pending patch per id.

use std::collections::HashMap;
use std::sync::Arc;

use catalog::Entity;
use common::{EntityId, EntityKind};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::error::{ConsoleError, Result};
use crate::pending::{EntityPatch, MutationKind, PendingMutation};

/// One cached record.
///
/// `confirmed` is `None` only for a create the backend has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub confirmed: Option<Entity>,
    pub pending: Option<PendingMutation>,
}

impl CacheEntry {
    fn confirmed(entity: Entity) -> Self {
        Self {
            confirmed: Some(entity),
            pending: None,
        }
    }

    /// The value to show: pending patch over confirmed.
    pub fn effective(&self) -> Option<Entity> {
        match &self.pending {
            Some(pending) => pending.patch.apply(self.confirmed.as_ref()),
            None => self.confirmed.clone(),
        }
    }

    pub fn kind(&self) -> Option<EntityKind> {
        self.confirmed
            .as_ref()
            .map(Entity::kind)
            .or_else(|| self.pending.as_ref().map(|p| p.entity_kind))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Point-in-time copy of the cache, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    entries: IndexMap<EntityId, CacheEntry>,
}

impl CacheSnapshot {
    pub fn get(&self, id: &EntityId) -> Option<&CacheEntry> {
        self.entries.get(id)
    }

    /// Entries of one kind, in backend order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = (&EntityId, &CacheEntry)> {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.kind() == Some(kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory mirror of the backend's records.
///
/// Only the mutation controller writes to it; views read snapshots. There is
/// no expiry: entries live until deleted or replaced by a reload.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    entries: Arc<RwLock<IndexMap<EntityId, CacheEntry>>>,
}

impl EntityCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective value of a record: the pending patch applied over the
    /// confirmed value.
    pub async fn get(&self, id: &EntityId) -> Option<Entity> {
        self.entries.read().await.get(id).and_then(CacheEntry::effective)
    }

    /// Last value the backend confirmed.
    pub async fn confirmed(&self, id: &EntityId) -> Option<Entity> {
        self.entries
            .read()
            .await
            .get(id)
            .and_then(|e| e.confirmed.clone())
    }

    /// Full entry, confirmed and pending.
    pub async fn entry(&self, id: &EntityId) -> Option<CacheEntry> {
        self.entries.read().await.get(id).cloned()
    }

    pub async fn pending(&self, id: &EntityId) -> Option<PendingMutation> {
        self.entries
            .read()
            .await
            .get(id)
            .and_then(|e| e.pending.clone())
    }

    /// Stores a confirmed value, keeping any pending patch.
    pub async fn set_confirmed(&self, id: EntityId, entity: Entity) {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&id) {
            Some(entry) => entry.confirmed = Some(entity),
            None => {
                entries.insert(id, CacheEntry::confirmed(entity));
            }
        }
    }

    /// Records an optimistic patch without touching the confirmed value.
    ///
    /// Fails with `MutationInFlight` if the record already has one, and with
    /// `EntityNotFound` if a non-create targets an unknown id.
    pub async fn apply_optimistic(&self, pending: PendingMutation) -> Result<()> {
        let mut entries = self.entries.write().await;
        let id = pending.entity_id.clone();

        match entries.get_mut(&id) {
            Some(entry) if entry.pending.is_some() => Err(ConsoleError::MutationInFlight(id)),
            Some(entry) => {
                entry.pending = Some(pending);
                Ok(())
            }
            None if pending.kind == MutationKind::Create => {
                entries.insert(
                    id,
                    CacheEntry {
                        confirmed: None,
                        pending: Some(pending),
                    },
                );
                Ok(())
            }
            None => Err(ConsoleError::EntityNotFound(id)),
        }
    }

    /// Settles a pending mutation as accepted.
    ///
    /// `server` is what the backend answered with; when it is absent the
    /// patched value is trusted. A create moves to the server-assigned id and
    /// a delete drops the entry. Returns the new confirmed value.
    pub async fn commit(&self, id: &EntityId, server: Option<Entity>) -> Option<Entity> {
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get_mut(id) else {
            // Dropped by a reload while in flight; trust the backend's answer.
            if let Some(entity) = server.clone() {
                entries.insert(entity.id().clone(), CacheEntry::confirmed(entity));
            }
            return server;
        };

        let Some(pending) = entry.pending.take() else {
            return entry.confirmed.clone();
        };

        match pending.patch {
            EntityPatch::Delete => {
                entries.shift_remove(id);
                None
            }
            EntityPatch::Create(provisional) => {
                let entity = server.unwrap_or(provisional);
                entries.shift_remove(id);
                entries.insert(entity.id().clone(), CacheEntry::confirmed(entity.clone()));
                Some(entity)
            }
            patch @ (EntityPatch::Replace(_) | EntityPatch::Status(_)) => {
                let entity = server.or_else(|| patch.apply(entry.confirmed.as_ref()));
                if entity.is_some() {
                    entry.confirmed = entity.clone();
                }
                entity
            }
        }
    }

    /// Discards the pending patch, leaving the confirmed value untouched.
    ///
    /// A rolled-back create removes its provisional entry.
    pub async fn rollback(&self, id: &EntityId) -> Option<PendingMutation> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(id)?;
        let pending = entry.pending.take();
        if entry.confirmed.is_none() {
            entries.shift_remove(id);
        }
        pending
    }

    /// Drops a record outright.
    pub async fn remove(&self, id: &EntityId) -> Option<CacheEntry> {
        self.entries.write().await.shift_remove(id)
    }

    /// Replaces every confirmed record of `kind` with a fresh backend listing.
    ///
    /// Pending patches survive for ids still listed, and provisional creates
    /// are kept after the listed records.
    pub async fn reload(&self, kind: EntityKind, entities: Vec<Entity>) {
        let mut entries = self.entries.write().await;
        let previous = std::mem::take(&mut *entries);

        let mut carried: HashMap<EntityId, PendingMutation> = HashMap::new();
        let mut provisional = Vec::new();
        let mut next = IndexMap::with_capacity(previous.len());

        for (id, entry) in previous {
            if entry.kind() != Some(kind) {
                next.insert(id, entry);
                continue;
            }
            match (entry.confirmed.is_some(), entry.pending) {
                (true, Some(pending)) => {
                    carried.insert(id, pending);
                }
                (false, Some(pending)) => provisional.push((id, pending)),
                (_, None) => {}
            }
        }

        for entity in entities {
            let id = entity.id().clone();
            let pending = carried.remove(&id);
            next.insert(
                id,
                CacheEntry {
                    confirmed: Some(entity),
                    pending,
                },
            );
        }

        for (id, pending) in provisional {
            next.insert(
                id,
                CacheEntry {
                    confirmed: None,
                    pending: Some(pending),
                },
            );
        }

        if !carried.is_empty() {
            tracing::debug!(
                %kind,
                dropped = carried.len(),
                "records with pending mutations vanished from the backend listing"
            );
        }

        *entries = next;
    }

    /// Copies the whole cache for rendering.
    pub async fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            entries: self.entries.read().await.clone(),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
