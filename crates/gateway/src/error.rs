use thiserror::Error;

use crate::Operation;

/// Errors surfaced by a gateway call.
///
/// Every variant names the operation and the target path so a failure can
/// be logged without the request at hand. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("{operation} {target} failed with HTTP {status}: {body}")]
    Status {
        operation: Operation,
        target: String,
        status: u16,
        body: String,
    },

    /// The request never got an answer.
    #[error("{operation} {target} failed: {message}")]
    Transport {
        operation: Operation,
        target: String,
        message: String,
    },

    /// The backend answered 2xx with a body that does not decode.
    #[error("{operation} {target} returned a malformed body: {message}")]
    MalformedResponse {
        operation: Operation,
        target: String,
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl GatewayError {
    /// HTTP status of a rejected request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            GatewayError::Status { operation, .. }
            | GatewayError::Transport { operation, .. }
            | GatewayError::MalformedResponse { operation, .. } => Some(*operation),
            GatewayError::Client(_) => None,
        }
    }
}

/// Result type for gateway calls.
pub type Result<T> = std::result::Result<T, GatewayError>;
