//! Signed-URL resolution: cache partition, batch exchange, per-item fallback.

pub mod orchestrator;

pub use orchestrator::{UrlFailure, UrlOrchestrator, UrlOutcome};
