//! HTTP gateway to the admin API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use catalog::{CartItem, Entity};
use common::{EntityId, EntityKind};
use reqwest::{Client, Method};
use serde::Deserialize;

use crate::request::{cart_path, collection_path};
use crate::{CartQuery, GatewayError, GatewayRequest, Operation, RemoteGateway, Result};

/// Gateway speaking JSON over HTTP to the storefront backend.
///
/// No timeout is set unless one is passed in; the transport default applies.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

/// Envelope of the cart query response. A missing `data` means "no lines".
#[derive(Debug, Deserialize)]
struct CartResponse {
    data: Option<Vec<CartItem>>,
}

impl HttpGateway {
    /// Creates a gateway against `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("vivigro-console/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the decoded JSON body, `None` if empty.
    ///
    /// Every attempt is timed, whatever the outcome.
    async fn send(
        &self,
        operation: Operation,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        metrics::counter!("gateway_requests_total", "operation" => operation.as_str())
            .increment(1);
        let started = Instant::now();

        let result = self.dispatch(operation, path, body).await;

        metrics::histogram!(
            "gateway_request_duration_seconds",
            "operation" => operation.as_str(),
            "outcome" => if result.is_ok() { "ok" } else { "error" }
        )
        .record(started.elapsed().as_secs_f64());
        result
    }

    async fn dispatch(
        &self,
        operation: Operation,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        let method = Method::from_bytes(operation.method().as_bytes())
            .map_err(|e| GatewayError::Client(e.to_string()))?;
        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| GatewayError::Transport {
            operation,
            target: path.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%operation, path, status = status.as_u16(), "gateway request rejected");
            return Err(GatewayError::Status {
                operation,
                target: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| GatewayError::Transport {
            operation,
            target: path.to_string(),
            message: e.to_string(),
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| GatewayError::MalformedResponse {
                operation,
                target: path.to_string(),
                message: e.to_string(),
            })
    }
}

fn decode_entity(
    kind: EntityKind,
    operation: Operation,
    target: &str,
    value: serde_json::Value,
) -> Result<Entity> {
    Entity::from_json(kind, value).map_err(|e| GatewayError::MalformedResponse {
        operation,
        target: target.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    #[tracing::instrument(skip(self, request), fields(operation = %request.operation, kind = %request.kind))]
    async fn submit(&self, request: GatewayRequest) -> Result<Option<Entity>> {
        let path = request.path();
        let body = self
            .send(request.operation, &path, request.payload.as_ref())
            .await?;

        match (request.operation, body) {
            // The backend may echo the deleted record; the console never needs it.
            (Operation::Delete, _) | (_, None) => Ok(None),
            (operation, Some(value)) => {
                decode_entity(request.kind, operation, &path, value).map(Some)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let path = collection_path(kind);
        let body = self.send(Operation::List, &path, None).await?;

        match body {
            None => Ok(Vec::new()),
            Some(serde_json::Value::Array(values)) => values
                .into_iter()
                .map(|v| decode_entity(kind, Operation::List, &path, v))
                .collect(),
            Some(_) => Err(GatewayError::MalformedResponse {
                operation: Operation::List,
                target: path,
                message: "expected a JSON array".to_string(),
            }),
        }
    }
}

#[async_trait]
impl CartQuery for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn cart_items(&self, user_id: &EntityId) -> Result<Vec<CartItem>> {
        let path = cart_path(user_id);
        let Some(body) = self.send(Operation::CartQuery, &path, None).await? else {
            return Ok(Vec::new());
        };

        let response: CartResponse =
            serde_json::from_value(body).map_err(|e| GatewayError::MalformedResponse {
                operation: Operation::CartQuery,
                target: path,
                message: e.to_string(),
            })?;

        Ok(response.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_trailing_slash() {
        let gateway = HttpGateway::new("http://localhost:3000/", None).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_decode_failure_is_malformed_response() {
        let err = decode_entity(
            EntityKind::Order,
            Operation::Patch,
            "/api/admin/orders/o1",
            serde_json::json!({"id": "o1"}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::MalformedResponse {
                operation: Operation::Patch,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let gateway =
            HttpGateway::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = gateway.list(EntityKind::Product).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Transport {
                operation: Operation::List,
                ..
            }
        ));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_failed_requests_are_timed() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let gateway =
                    HttpGateway::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
                assert!(gateway.list(EntityKind::Product).await.is_err());
            })
        });

        let rendered = handle.render();
        assert!(rendered.contains("gateway_request_duration_seconds_count"));
        assert!(rendered.contains(r#"outcome="error""#));
    }
}
