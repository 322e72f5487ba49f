use std::sync::Arc;

mod auth;
mod client;
mod demo;
mod handlers;
mod metrics;
mod middleware;
mod server;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Upstream delivery-API client (cloneable, shared connection pool).
    pub api: client::DeliveryApi,

    /// The one persisted value: the current session, backed by a file.
    pub auth: auth::AuthStore,

    /// Latest metrics snapshot + table ordering — handlers install
    /// snapshots, the report endpoints read derived views.
    pub dashboard: metrics::Dashboard,
}

#[tokio::main]
async fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║   🚚  DELIVERY API CONSOLE                       ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    // ── 1. Restore any persisted session ─────────────────────────
    let auth = auth::AuthStore::open(auth::DEFAULT_STORE_PATH);
    match auth.current() {
        Some(session) => println!("🔑 Restored session for {}", session.email),
        None => println!("🔑 No stored session — log in via POST /api/login"),
    }

    // ── 2. Upstream client ───────────────────────────────────────
    let api = client::DeliveryApi::new(client::DEFAULT_BASE_URL);
    println!("🌐 Upstream API: {}", api.base_url());

    // ── 3. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState {
        api,
        auth,
        dashboard: metrics::Dashboard::new(),
    });

    // ── 4. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state);

    // ── 5. Bind & serve ──────────────────────────────────────────
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to port 3000 — is it already in use?");

    println!();
    println!("Console listening on http://localhost:3000");
    println!("Dashboard JSON  → http://localhost:3000/api/metrics/dashboard");
    println!("Detail table    → http://localhost:3000/api/metrics/records");
    println!("Demo data       → POST http://localhost:3000/api/demo/load");
    println!();

    axum::serve(listener, app)
        .await
        .expect("Server exited with error");
}
