//! Gateway requests and the endpoints they map to.

use common::{EntityId, EntityKind};
use serde::Serialize;

/// Prefix of every admin endpoint.
pub const ADMIN_PREFIX: &str = "/api/admin";

/// Kind of call made through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Patch,
    Delete,
    List,
    CartQuery,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Patch => "patch",
            Operation::Delete => "delete",
            Operation::List => "list",
            Operation::CartQuery => "cart_query",
        }
    }

    /// HTTP method the operation is sent with.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Create => "POST",
            Operation::Update => "PUT",
            Operation::Patch => "PATCH",
            Operation::Delete => "DELETE",
            Operation::List | Operation::CartQuery => "GET",
        }
    }

    /// Returns true for calls that change server state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::Patch | Operation::Delete
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A mutation addressed to one admin collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub kind: EntityKind,
    pub operation: Operation,
    pub id: Option<EntityId>,
    pub payload: Option<serde_json::Value>,
}

impl GatewayRequest {
    /// `POST /api/admin/{kind}` with `payload` as the body.
    pub fn create(kind: EntityKind, payload: &impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            kind,
            operation: Operation::Create,
            id: None,
            payload: Some(serde_json::to_value(payload)?),
        })
    }

    /// `PUT /api/admin/{kind}/{id}` replacing the whole record.
    pub fn update(
        kind: EntityKind,
        id: EntityId,
        payload: &impl Serialize,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            kind,
            operation: Operation::Update,
            id: Some(id),
            payload: Some(serde_json::to_value(payload)?),
        })
    }

    /// `PATCH /api/admin/{kind}/{id}` with a partial body.
    pub fn patch(
        kind: EntityKind,
        id: EntityId,
        payload: &impl Serialize,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            kind,
            operation: Operation::Patch,
            id: Some(id),
            payload: Some(serde_json::to_value(payload)?),
        })
    }

    /// `DELETE /api/admin/{kind}/{id}`.
    pub fn delete(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            operation: Operation::Delete,
            id: Some(id),
            payload: None,
        }
    }

    /// Endpoint path, relative to the backend origin.
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => item_path(self.kind, id),
            None => collection_path(self.kind),
        }
    }
}

pub fn collection_path(kind: EntityKind) -> String {
    format!("{ADMIN_PREFIX}/{}", kind.collection())
}

pub fn item_path(kind: EntityKind, id: &EntityId) -> String {
    format!("{ADMIN_PREFIX}/{}/{}", kind.collection(), id)
}

pub fn cart_path(user_id: &EntityId) -> String {
    format!("/api/cart/{user_id}")
}
