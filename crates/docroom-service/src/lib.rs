//! # docroom-service
//!
//! Business logic service layer for DocRoom. Each service orchestrates the
//! backend client, the signed-URL cache, and the in-memory session store
//! to implement the secure delivery flow: gate → resolve → deliver.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod folder;
pub mod gate;
pub mod resolver;
pub mod session;
pub mod urls;

#[cfg(test)]
pub(crate) mod testutil;

pub use folder::{FolderTreeIndex, filter_by_class, filter_by_name, sort_documents};
pub use gate::{AccessGate, ChallengeProgress, DenialReason, GateState};
pub use resolver::{
    AccessMeta, ContentResolver, ContentSelection, ResolvedContent, ResolvedDocument, ResolvedView,
};
pub use session::{GateSession, SessionStore};
pub use urls::{UrlFailure, UrlOrchestrator, UrlOutcome};
