use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::client::Order;
use crate::AppState;

use super::{require_token, AppError, ProxiedResponse, UpstreamCall};

// ─── POST /api/orders ────────────────────────────────────────────

/// Submit an order document to the upstream API. The body is validated
/// against the order schema here; everything else is the API's call.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(order): Json<Order>,
) -> Result<Json<ProxiedResponse<Value>>, AppError> {
    let token = require_token(&state)?;

    if order.total < 0.0 {
        return Err(AppError::BadRequest("valor_total must not be negative".into()));
    }
    if order.items.is_empty() {
        return Err(AppError::BadRequest("order must contain at least one item".into()));
    }

    let t0 = Instant::now();
    let created = state.api.create_order(&order, &token).await?;

    Ok(Json(ProxiedResponse {
        data: created,
        upstream: UpstreamCall::timed("/pedido", t0),
    }))
}

// ─── GET /api/orders ─────────────────────────────────────────────

/// Today's orders for the account, passed through raw for the shell's
/// JSON viewer.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProxiedResponse<Value>>, AppError> {
    let token = require_token(&state)?;

    let t0 = Instant::now();
    let orders = state.api.orders(&token).await?;

    Ok(Json(ProxiedResponse {
        data: orders,
        upstream: UpstreamCall::timed("/pedidos", t0),
    }))
}
