//! Admin CRUD endpoints under `/api/admin/{collection}`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog::Entity;
use common::{EntityId, EntityKind};
use gateway::{GatewayRequest, InMemoryGateway, Operation, RemoteGateway};
use serde_json::Value;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub backend: InMemoryGateway,
}

fn kind_of(collection: &str) -> Result<EntityKind, ApiError> {
    EntityKind::from_collection(collection)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown collection: {collection}")))
}

/// Runs one mutation against the store and counts it.
async fn mutate(state: &AppState, request: GatewayRequest) -> Result<Option<Entity>, ApiError> {
    let operation = request.operation;
    let kind = request.kind;
    let result = state.backend.submit(request).await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(_) => "rejected",
    };
    metrics::counter!(
        "admin_api_mutations_total",
        "operation" => operation.as_str(),
        "kind" => kind.collection(),
        "outcome" => outcome,
    )
    .increment(1);

    Ok(result?)
}

fn answered(operation: Operation, entity: Option<Entity>) -> Result<Json<Entity>, ApiError> {
    entity
        .map(Json)
        .ok_or_else(|| ApiError::Internal(format!("{operation} produced no record")))
}

/// GET /api/admin/{collection}: every record, in store order.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Entity>>, ApiError> {
    let kind = kind_of(&collection)?;
    Ok(Json(state.backend.list(kind).await?))
}

/// POST /api/admin/{collection}: create from the raw form body.
#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Entity>), ApiError> {
    let kind = kind_of(&collection)?;
    let created = mutate(&state, GatewayRequest::create(kind, &body)?).await?;
    tracing::info!(%kind, "record created");
    Ok((StatusCode::CREATED, answered(Operation::Create, created)?))
}

/// PUT /api/admin/{collection}/{id}: full replacement.
#[tracing::instrument(skip(state, body))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Entity>, ApiError> {
    let kind = kind_of(&collection)?;
    let request = GatewayRequest::update(kind, EntityId::new(id), &body)?;
    answered(Operation::Update, mutate(&state, request).await?)
}

/// PATCH /api/admin/{collection}/{id}: partial update, e.g. `{"status":"PAID"}`.
#[tracing::instrument(skip(state, body))]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Entity>, ApiError> {
    let kind = kind_of(&collection)?;
    let request = GatewayRequest::patch(kind, EntityId::new(id), &body)?;
    answered(Operation::Patch, mutate(&state, request).await?)
}

/// DELETE /api/admin/{collection}/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let kind = kind_of(&collection)?;
    mutate(&state, GatewayRequest::delete(kind, EntityId::new(id))).await?;
    Ok(StatusCode::NO_CONTENT)
}
