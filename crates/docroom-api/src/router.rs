//! Route definitions for the DocRoom HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(viewer_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Viewer-facing gate and content endpoints.
fn viewer_routes() -> Router<AppState> {
    Router::new()
        .route("/v/{token}", get(handlers::access::open_gate))
        .route("/v/{token}/password", post(handlers::access::submit_password))
        .route("/v/{token}/viewer", post(handlers::access::submit_viewer))
        .route("/v/{token}/nda", post(handlers::access::sign_nda))
        .route("/v/{token}/contents", get(handlers::content::get_contents))
}

/// Health check endpoints (no session required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
