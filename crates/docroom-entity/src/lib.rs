//! # docroom-entity
//!
//! Domain entity models for DocRoom. Every struct in this crate represents
//! a record owned by the managed backend or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`; they
//! carry no behavior beyond cheap derived accessors.

pub mod document;
pub mod folder;
pub mod link;
pub mod url;
pub mod viewer;

pub use document::{Bundle, SecureDocument};
pub use folder::{Folder, FolderContents};
pub use link::{AccessLevel, ContentRef, LinkContent, LinkRecord, LinkStatus, SecureLink};
pub use url::{SignedUrl, SignedUrlBatch, SignedUrlRequest};
pub use viewer::{NdaSignature, ViewerIdentity};
