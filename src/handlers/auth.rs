use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthData;
use crate::AppState;

use super::{AppError, ProxiedResponse, UpstreamCall};

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

// ─── POST /api/login ─────────────────────────────────────────────

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ProxiedResponse<AuthData>>, AppError> {
    let t0 = Instant::now();
    let auth = state.api.login(&req.email, &req.password).await?;
    let upstream = UpstreamCall::timed("/login", t0);

    // a fresh session invalidates whatever the previous account fetched
    state.dashboard.clear();
    state
        .auth
        .save(auth.clone())
        .map_err(|e| AppError::Internal(format!("cannot persist session: {e}")))?;

    println!("  session opened for {}", auth.email);

    Ok(Json(ProxiedResponse { data: auth, upstream }))
}

// ─── POST /api/logout ────────────────────────────────────────────

pub async fn logout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LogoutResponse>, AppError> {
    state
        .auth
        .clear()
        .map_err(|e| AppError::Internal(format!("cannot remove session: {e}")))?;
    state.dashboard.clear();

    Ok(Json(LogoutResponse { logged_out: true }))
}

// ─── GET /api/session ────────────────────────────────────────────

/// The restored or freshly-created session, for the shell's header.
pub async fn session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AuthData>, AppError> {
    state.auth.current().map(Json).ok_or(AppError::NotLoggedIn)
}
