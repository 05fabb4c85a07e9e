//! Catalog error types.

use common::EntityKind;
use thiserror::Error;

/// Errors raised while converting wire data into catalog records.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A numeric form field did not hold a number.
    #[error("Invalid {field}: {value:?} is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    /// A record of one kind was handed where another was expected.
    #[error("Expected a {expected} record, got a {actual} record")]
    KindMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },

    /// The JSON body did not match the record shape.
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for catalog conversions.
pub type Result<T> = std::result::Result<T, CatalogError>;
