//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gateway::GatewayError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown collection or record.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The backend refused or failed the operation.
    Backend(GatewayError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Backend(err) => backend_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn backend_error_to_response(err: GatewayError) -> (StatusCode, String) {
    match err {
        GatewayError::Status { status, body, .. } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        ),
        other => {
            tracing::error!(error = %other, "backend failure");
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Backend(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::Operation;

    #[test]
    fn test_backend_status_is_forwarded() {
        let (status, message) = backend_error_to_response(GatewayError::Status {
            operation: Operation::Create,
            target: "/api/admin/orders".to_string(),
            status: 405,
            body: "method not allowed".to_string(),
        });
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(message, "method not allowed");
    }

    #[test]
    fn test_other_backend_errors_are_500() {
        let (status, _) = backend_error_to_response(GatewayError::Client("boom".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
