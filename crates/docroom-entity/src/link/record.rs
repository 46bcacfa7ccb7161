//! Link record — a link joined with the content it references.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Bundle, SecureDocument};
use crate::link::SecureLink;

/// The content payload joined onto a link by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkContent {
    /// A single document, fully loaded.
    Document(SecureDocument),
    /// A bundle with its documents loaded.
    Bundle(Bundle),
    /// A folder reference; the tree is fetched separately.
    Folder { folder_id: Uuid },
}

impl LinkContent {
    /// Short label for the content kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::Bundle(_) => "bundle",
            Self::Folder { .. } => "folder",
        }
    }
}

/// A link joined with its content reference, as returned by link resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The link itself.
    pub link: SecureLink,
    /// The joined content payload.
    pub content: LinkContent,
}
