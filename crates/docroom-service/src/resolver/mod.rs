//! Link/content resolution — turning a granted session into viewable,
//! URL-bearing content.

pub mod expiry;
pub mod model;
pub mod service;

pub use model::{AccessMeta, ContentSelection, ResolvedContent, ResolvedDocument, ResolvedView};
pub use service::ContentResolver;
