use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::metrics::present::{DashboardReport, TableView};
use crate::metrics::{MetricsCollection, SortKey};
use crate::AppState;

use super::{require_token, AppError, ProxiedResponse, UpstreamCall};

// ─── GET /api/metrics ────────────────────────────────────────────

/// Fetch a fresh request log from the upstream API, install it as the
/// current dashboard snapshot (wholesale replacement), and echo the raw
/// collection for the shell's JSON viewer.
pub async fn fetch_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProxiedResponse<MetricsCollection>>, AppError> {
    let token = require_token(&state)?;

    let t0 = Instant::now();
    let collection = state.api.metrics(&token).await?;
    let upstream = UpstreamCall::timed("/metricas", t0);

    state.dashboard.install(collection.clone());

    Ok(Json(ProxiedResponse { data: collection, upstream }))
}

// ─── GET /api/metrics/dashboard ──────────────────────────────────

/// Summary cards and the four chart series derived from the installed
/// snapshot. 404 until a snapshot exists; an empty account log is also
/// "no data" — the shell renders nothing rather than zeroed charts.
pub async fn dashboard_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardReport>, AppError> {
    state.dashboard.report().map(Json).ok_or(AppError::NoData)
}

// ─── GET /api/metrics/records ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    /// Column-header click: same column flips, new column sorts
    /// descending. Omitted → read the table under its current ordering.
    pub sort: Option<SortKey>,
}

pub async fn records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<TableView>, AppError> {
    state.dashboard.rows(query.sort).map(Json).ok_or(AppError::NoData)
}
