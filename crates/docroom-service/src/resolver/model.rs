//! Resolved content models handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docroom_core::types::{DocumentSort, FileClass};
use docroom_entity::{AccessLevel, Folder, SecureDocument, SecureLink};

/// A document with a fetchable, time-limited URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedDocument {
    /// The underlying document record.
    #[serde(flatten)]
    pub document: SecureDocument,
    /// Derived content class.
    pub file_class: FileClass,
    /// The fetchable URL.
    pub url: String,
    /// Seconds the URL remains valid.
    pub url_expires_in: u64,
}

/// What a granted link resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedContent {
    /// A single document.
    Document {
        /// The resolved document.
        document: ResolvedDocument,
    },
    /// A bundle of documents.
    Bundle {
        /// Bundle id.
        id: Uuid,
        /// Bundle display name.
        name: String,
        /// Resolved documents; unresolvable ones are dropped.
        documents: Vec<ResolvedDocument>,
        /// Echoed document selection, when present in the set.
        selected_document: Option<Uuid>,
    },
    /// A folder tree.
    Folder {
        /// The link's target folder.
        root_folder: Folder,
        /// Every visible folder, root first.
        folders: Vec<Folder>,
        /// The folder whose contents are listed.
        selected_folder: Uuid,
        /// Resolved documents visible under the selected folder, after
        /// filtering and sorting.
        documents: Vec<ResolvedDocument>,
    },
}

/// Link facts the presentation layer needs to enforce and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessMeta {
    /// What the viewer may do (`view_only` suppresses download/copy).
    pub access_level: AccessLevel,
    /// When the link expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// The view budget, when limited.
    pub max_views: Option<i32>,
    /// Views consumed so far.
    pub current_views: i32,
}

impl From<&SecureLink> for AccessMeta {
    fn from(link: &SecureLink) -> Self {
        Self {
            access_level: link.access_level,
            expires_at: link.expires_at,
            max_views: link.max_views,
            current_views: link.current_views,
        }
    }
}

/// The full payload returned to the presentation layer for a granted view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedView {
    /// Link facts for enforcement and display.
    pub access: AccessMeta,
    /// The resolved content.
    pub content: ResolvedContent,
}

/// Viewer-driven selection over bundle and folder content.
#[derive(Debug, Clone, Default)]
pub struct ContentSelection {
    /// Selected folder (folder links; defaults to the root).
    pub folder: Option<Uuid>,
    /// Selected document (bundles and folders; echo only).
    pub document: Option<Uuid>,
    /// Substring file-name filter.
    pub query: Option<String>,
    /// Content class filter.
    pub class: Option<FileClass>,
    /// Sort order (defaults to name ascending).
    pub sort: Option<DocumentSort>,
}
