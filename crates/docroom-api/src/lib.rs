//! # docroom-api
//!
//! HTTP API layer for DocRoom built on Axum.
//!
//! Exposes the access gate and content resolution to the presentation
//! layer: gate state endpoints, challenge submissions, and resolved
//! contents, plus health. Viewer sessions ride in the `x-viewer-session`
//! header.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
