//! Application state shared across all handlers.

use std::sync::Arc;

use docroom_cache::SignedUrlCache;
use docroom_client::DeliveryBackend;
use docroom_core::config::AppConfig;
use docroom_service::{AccessGate, ContentResolver, SessionStore, UrlOrchestrator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Managed backend client.
    pub backend: Arc<dyn DeliveryBackend>,
    /// Process-wide signed-URL cache.
    pub url_cache: Arc<SignedUrlCache>,
    /// Viewer gate sessions.
    pub sessions: Arc<SessionStore>,
    /// Access gate service.
    pub gate: Arc<AccessGate>,
    /// Content resolution service.
    pub resolver: Arc<ContentResolver>,
}

impl AppState {
    /// Wire the full service stack over a backend implementation.
    pub fn build(config: AppConfig, backend: Arc<dyn DeliveryBackend>) -> Self {
        let url_cache = Arc::new(SignedUrlCache::new(
            config.delivery.cache_safety_margin_seconds,
        ));
        let sessions = Arc::new(SessionStore::new(
            config.delivery.session_idle_timeout_seconds,
        ));
        let orchestrator = Arc::new(UrlOrchestrator::new(
            Arc::clone(&backend),
            Arc::clone(&url_cache),
            &config.delivery,
        ));
        let gate = Arc::new(AccessGate::new(
            Arc::clone(&backend),
            Arc::clone(&sessions),
        ));
        let resolver = Arc::new(ContentResolver::new(
            Arc::clone(&backend),
            orchestrator,
            config.delivery.clone(),
        ));

        Self {
            config: Arc::new(config),
            backend,
            url_cache,
            sessions,
            gate,
            resolver,
        }
    }
}
