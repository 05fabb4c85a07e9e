//! Cart lookup used by the storefront header.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::CartItem;
use common::EntityId;
use gateway::CartQuery;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::admin::AppState;

#[derive(Serialize)]
pub struct CartResponse {
    pub data: Vec<CartItem>,
}

/// GET /api/cart/{user_id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let data = state.backend.cart_items(&EntityId::new(user_id)).await?;
    Ok(Json(CartResponse { data }))
}
