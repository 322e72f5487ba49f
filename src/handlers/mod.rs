pub mod auth;
pub mod credentials;
pub mod demo;
pub mod metrics;
pub mod orders;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::client::ApiError;
use crate::AppState;

// ─── Shared response envelope ────────────────────────────────────

/// Every proxied response is wrapped with upstream call metadata so the
/// console can show per-request latency without parsing headers.
#[derive(Debug, Clone, Serialize)]
pub struct ProxiedResponse<T: Serialize> {
    pub data: T,
    pub upstream: UpstreamCall,
}

/// Which remote route was called and how long the round-trip took.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamCall {
    pub endpoint: &'static str,
    pub elapsed_ms: f64,
}

impl UpstreamCall {
    pub fn timed(endpoint: &'static str, started: Instant) -> Self {
        Self {
            endpoint,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug)]
pub enum AppError {
    /// The remote API rejected the call; its status is passed through.
    Upstream { status: u16, message: String },
    Network(String),
    NotLoggedIn,
    /// Nothing fetched yet — derived views have no snapshot to read.
    NoData,
    BadRequest(String),
    Internal(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => Self::Network(msg),
            ApiError::Upstream { status, message, code } => Self::Upstream {
                status,
                message: match code {
                    Some(code) => format!("{message} ({code})"),
                    None => message,
                },
            },
            ApiError::Decode(msg) => Self::Internal(format!("bad upstream body: {msg}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Upstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            Self::Network(msg) => {
                (StatusCode::BAD_GATEWAY, format!("upstream unreachable: {msg}"))
            }
            Self::NotLoggedIn => {
                (StatusCode::UNAUTHORIZED, "no active session — log in first".into())
            }
            Self::NoData => (
                StatusCode::NOT_FOUND,
                "no metrics snapshot — fetch metrics or load demo data first".into(),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error":  message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Bearer token of the active session, or a 401.
pub fn require_token(state: &Arc<AppState>) -> Result<String, AppError> {
    state.auth.token().ok_or(AppError::NotLoggedIn)
}
