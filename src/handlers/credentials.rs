use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::AppState;

use super::{require_token, AppError, ProxiedResponse, UpstreamCall};

// ─── GET /api/credentials ────────────────────────────────────────

/// Whatever the API reports about the current credentials, raw. Useful
/// when a token works for orders but not for metrics.
pub async fn debug_credentials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProxiedResponse<Value>>, AppError> {
    let token = require_token(&state)?;

    let t0 = Instant::now();
    let report = state.api.debug_credentials(&token).await?;

    Ok(Json(ProxiedResponse {
        data: report,
        upstream: UpstreamCall::timed("/debug-credenciais", t0),
    }))
}
