//! Two-tier signed-URL resolution with explicit per-item outcomes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use docroom_cache::SignedUrlCache;
use docroom_client::DeliveryBackend;
use docroom_core::config::delivery::DeliveryConfig;
use docroom_entity::{SignedUrl, SignedUrlRequest};

/// Why one requested item could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFailure {
    /// The batch response did not include the item.
    MissingFromBatch,
    /// Every per-item attempt failed.
    AttemptsExhausted,
}

impl fmt::Display for UrlFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFromBatch => write!(f, "missing from batch response"),
            Self::AttemptsExhausted => write!(f, "all signing attempts failed"),
        }
    }
}

/// Per-item result of a resolution run.
///
/// Callers decide whether partial success is acceptable; the orchestrator
/// itself never errors over failed items.
#[derive(Debug, Clone)]
pub enum UrlOutcome {
    /// The item resolved to a fetchable URL.
    Resolved(SignedUrl),
    /// The item could not be resolved.
    Failed(UrlFailure),
}

impl UrlOutcome {
    /// The signed URL, if this item resolved.
    pub fn resolved(&self) -> Option<&SignedUrl> {
        match self {
            Self::Resolved(signed) => Some(signed),
            Self::Failed(_) => None,
        }
    }
}

/// Converts storage references into signed URLs through the cache, one
/// consolidated exchange, and a retrying per-item fallback.
#[derive(Debug)]
pub struct UrlOrchestrator {
    backend: Arc<dyn DeliveryBackend>,
    cache: Arc<SignedUrlCache>,
    max_attempts: u32,
    base_delay: Duration,
}

impl UrlOrchestrator {
    /// Create an orchestrator over a backend and a URL cache.
    pub fn new(
        backend: Arc<dyn DeliveryBackend>,
        cache: Arc<SignedUrlCache>,
        config: &DeliveryConfig,
    ) -> Self {
        Self {
            backend,
            cache,
            max_attempts: config.fallback_max_attempts.max(1),
            base_delay: Duration::from_millis(config.fallback_base_delay_ms),
        }
    }

    /// Resolve a set of storage references to URLs.
    ///
    /// Duplicate storage paths collapse to one request. Every distinct path
    /// appears exactly once in the returned map, as either outcome; no
    /// returned URL has lapsed at return time.
    pub async fn resolve_urls(
        &self,
        requests: &[SignedUrlRequest],
    ) -> HashMap<String, UrlOutcome> {
        let mut outcomes: HashMap<String, UrlOutcome> = HashMap::new();
        let mut pending: Vec<SignedUrlRequest> = Vec::new();

        for request in requests {
            if outcomes.contains_key(&request.storage_path)
                || pending.iter().any(|p| p.storage_path == request.storage_path)
            {
                continue;
            }
            match self.cache.get(&request.storage_path, request.is_video) {
                Some(hit) => {
                    outcomes.insert(request.storage_path.clone(), UrlOutcome::Resolved(hit));
                }
                None => pending.push(request.clone()),
            }
        }

        if pending.is_empty() {
            debug!(
                hits = outcomes.len(),
                "All requested URLs served from cache"
            );
            return outcomes;
        }

        debug!(
            hits = outcomes.len(),
            misses = pending.len(),
            "Resolving signed URLs"
        );

        match self.backend.sign_urls_batch(&pending).await {
            Ok(batch) => {
                let mut by_path: HashMap<String, SignedUrl> = batch
                    .signed_urls
                    .into_iter()
                    .map(|s| (s.storage_path.clone(), s))
                    .collect();
                for request in &pending {
                    match by_path.remove(&request.storage_path) {
                        Some(signed) => {
                            // Cache with the TTL the response declared.
                            self.cache.insert(&signed);
                            outcomes.insert(
                                request.storage_path.clone(),
                                UrlOutcome::Resolved(signed),
                            );
                        }
                        None => {
                            warn!(
                                storage_path = %request.storage_path,
                                "Item absent from batch signing response"
                            );
                            outcomes.insert(
                                request.storage_path.clone(),
                                UrlOutcome::Failed(UrlFailure::MissingFromBatch),
                            );
                        }
                    }
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    count = pending.len(),
                    "Batch signing exchange failed, falling back to per-item requests"
                );
                let results = join_all(pending.iter().map(|req| self.resolve_single(req))).await;
                for (request, outcome) in pending.iter().zip(results) {
                    outcomes.insert(request.storage_path.clone(), outcome);
                }
            }
        }

        outcomes
    }

    /// Resolve one item with linear backoff: attempt `n` waits `n × base`
    /// before the next try.
    async fn resolve_single(&self, request: &SignedUrlRequest) -> UrlOutcome {
        for attempt in 1..=self.max_attempts {
            match self.backend.sign_url(request).await {
                Ok(signed) => {
                    self.cache.insert(&signed);
                    return UrlOutcome::Resolved(signed);
                }
                Err(e) => {
                    debug!(
                        storage_path = %request.storage_path,
                        attempt,
                        error = %e,
                        "Per-item signing attempt failed"
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.base_delay * attempt).await;
                    }
                }
            }
        }
        warn!(
            storage_path = %request.storage_path,
            attempts = self.max_attempts,
            "Per-item signing exhausted its attempts"
        );
        UrlOutcome::Failed(UrlFailure::AttemptsExhausted)
    }
}
