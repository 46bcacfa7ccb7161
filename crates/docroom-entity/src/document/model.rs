//! Secure document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docroom_core::types::FileClass;

/// A document reachable through a secure link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureDocument {
    /// Unique document identifier.
    pub id: Uuid,
    /// Opaque path in the backing store (not a fetchable URL).
    pub storage_path: String,
    /// The file name (including extension).
    pub file_name: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// Optional description shown alongside the document.
    pub description: Option<String>,
    /// The folder containing this document (folder-shared links only).
    pub folder_id: Option<Uuid>,
    /// File size in bytes, when the backend reports it.
    pub size_bytes: Option<i64>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
}

impl SecureDocument {
    /// Content class derived from MIME type with extension fallback.
    pub fn file_class(&self) -> FileClass {
        FileClass::classify(self.mime_type.as_deref(), &self.file_name)
    }

    /// Whether this document uses the shorter video URL TTL window.
    pub fn is_video(&self) -> bool {
        self.file_class().is_video()
    }
}

/// A named, ordered set of documents shared as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    /// Unique bundle identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The documents in this bundle.
    pub documents: Vec<SecureDocument>,
}
