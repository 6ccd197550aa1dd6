// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer, cookie::Key};

use crate::{
    handlers::{pages, qr, quiz, stats},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (pages, quiz actions, QR, stats).
/// * Applies global middleware (Trace, signed-cookie sessions).
/// * Injects global state (catalog, groups, optional pool, config).
pub fn create_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let signing_key = Key::derive_from(state.config.secret_key.as_bytes());
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_signed(signing_key);

    // The stats API is read-only and may be embedded elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/g/{group_code}", get(pages::group_landing))
        .route("/quiz", get(pages::quiz_page))
        .route("/result", get(pages::result_page));

    let action_routes = Router::new()
        .route("/start", post(quiz::start_full))
        .route("/g/{group_code}/start", post(quiz::start_group))
        .route("/answer", post(quiz::answer))
        .route("/next", post(quiz::next))
        .route("/reset", post(quiz::reset));

    // One route for both "/qr/{code}.png" and "/qr/{code}": axum captures
    // whole segments, so the handler dispatches on the suffix.
    let qr_routes = Router::new().route("/qr/{name}", get(qr::qr_entry));

    let stats_routes = Router::new()
        .route("/api/stats/{group_code}", get(stats::api_stats).layer(cors))
        .route("/stats/{group_code}", get(stats::stats_page));

    Router::new()
        .merge(page_routes)
        .merge(action_routes)
        .merge(qr_routes)
        .merge(stats_routes)
        // Batch-generated QR images live under static/qr.
        .nest_service("/static", ServeDir::new("static"))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(state)
}
