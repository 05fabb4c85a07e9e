//! Console error types.

use catalog::CatalogError;
use common::{EntityId, EntityKind};
use gateway::GatewayError;
use thiserror::Error;

/// Errors returned by console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The backend rejected or never answered the call. The optimistic patch
    /// has already been rolled back when this is returned.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The user declined the confirmation prompt.
    #[error("Action cancelled at the confirmation prompt")]
    ConfirmationAborted,

    /// A mutation for this record is still in flight.
    #[error("A mutation is already pending for {0}")]
    MutationInFlight(EntityId),

    /// The product form is already being submitted.
    #[error("The product form is already being submitted")]
    SubmissionInFlight,

    /// The record is not in the cache.
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A status change targeted something that is not an order.
    #[error("Not an order: {0}")]
    NotAnOrder(EntityId),

    /// The record exists but is of another kind than the caller named.
    #[error("{id} is a {actual}, not a {expected}")]
    KindMismatch {
        id: EntityId,
        expected: EntityKind,
        actual: EntityKind,
    },

    /// Invalid console configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record of the wrong kind came back.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for console results.
pub type Result<T> = std::result::Result<T, ConsoleError>;
