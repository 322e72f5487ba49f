use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes, middleware, and static serving.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Session ─────────────────────────────────────────────
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/session", get(handlers::auth::session))
        // ── Orders ──────────────────────────────────────────────
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        // ── Credential debugging ────────────────────────────────
        .route(
            "/api/credentials",
            get(handlers::credentials::debug_credentials),
        )
        // ── Metrics + derived views ─────────────────────────────
        .route("/api/metrics", get(handlers::metrics::fetch_metrics))
        .route(
            "/api/metrics/dashboard",
            get(handlers::metrics::dashboard_report),
        )
        .route("/api/metrics/records", get(handlers::metrics::records))
        // ── Demo data control ───────────────────────────────────
        .route("/api/demo/load", post(handlers::demo::load_demo))
        .route("/api/demo/clear", post(handlers::demo::clear_demo))
        .route("/api/demo/status", get(handlers::demo::demo_status))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Serve static/ directory for the console shell ───────
        .fallback_service(ServeDir::new("static"))
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(CorsLayer::permissive())
}
