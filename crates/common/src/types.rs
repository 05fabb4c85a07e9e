use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PROVISIONAL_PREFIX: &str = "provisional-";

/// Opaque identifier of a record owned by the remote store.
///
/// The backend decides the format; the console never parses it. The only
/// ids minted locally are provisional ones for creates that have not been
/// confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an id handed out by the backend.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a local id for a record that only exists optimistically.
    pub fn provisional() -> Self {
        Self(format!("{PROVISIONAL_PREFIX}{}", Uuid::new_v4()))
    }

    /// Mints a fresh server-side id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns true if this id was minted locally and never confirmed.
    pub fn is_provisional(&self) -> bool {
        self.0.starts_with(PROVISIONAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The kinds of record the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Order,
    User,
}

impl EntityKind {
    /// All kinds, in dashboard tab order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Product, EntityKind::Order, EntityKind::User];

    /// Path segment of the admin collection endpoint for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Order => "orders",
            EntityKind::User => "users",
        }
    }

    /// Parses a collection path segment back into a kind.
    pub fn from_collection(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == segment)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "Product",
            EntityKind::Order => "Order",
            EntityKind::User => "User",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
