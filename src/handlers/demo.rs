use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::demo;
use crate::AppState;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// How many sample records to generate
    #[serde(default = "default_records")]
    pub records: usize,

    /// Calendar window the records are spread over, in days
    #[serde(default = "default_days")]
    pub days: u32,

    /// RNG seed — same seed, same dashboard
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_records() -> usize {
    250
}
fn default_days() -> u32 {
    14
}
fn default_seed() -> u64 {
    42
}

#[derive(Debug, Serialize)]
pub struct DemoStatus {
    pub loaded: bool,
    pub records: usize,
    pub message: String,
}

// ─── POST /api/demo/load ─────────────────────────────────────────

/// Install a generated sample snapshot so the dashboard can be explored
/// without upstream credentials.
pub async fn load_demo(
    State(state): State<Arc<AppState>>,
    Json(config): Json<DemoConfig>,
) -> Result<Json<DemoStatus>, AppError> {
    if config.records == 0 || config.records > 10_000 {
        return Err(AppError::BadRequest(
            "records must be between 1 and 10000".into(),
        ));
    }
    if config.days == 0 || config.days > 90 {
        return Err(AppError::BadRequest("days must be between 1 and 90".into()));
    }

    let collection = demo::generate(config.records, config.days, config.seed);
    let count = collection.len();
    state.dashboard.install(collection);

    Ok(Json(DemoStatus {
        loaded: true,
        records: count,
        message: format!(
            "Loaded {} demo records over {} days (seed {})",
            count, config.days, config.seed,
        ),
    }))
}

// ─── POST /api/demo/clear ────────────────────────────────────────

pub async fn clear_demo(State(state): State<Arc<AppState>>) -> Json<DemoStatus> {
    state.dashboard.clear();
    Json(DemoStatus {
        loaded: false,
        records: 0,
        message: "Snapshot cleared".into(),
    })
}

// ─── GET /api/demo/status ────────────────────────────────────────

pub async fn demo_status(State(state): State<Arc<AppState>>) -> Json<DemoStatus> {
    let count = state.dashboard.record_count();
    Json(DemoStatus {
        loaded: count > 0,
        records: count,
        message: if count > 0 {
            format!("{count} records installed")
        } else {
            "No snapshot installed".into()
        },
    })
}
