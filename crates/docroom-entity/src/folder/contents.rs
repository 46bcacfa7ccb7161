//! Flattened folder contents as returned by the backend.

use serde::{Deserialize, Serialize};

use crate::document::SecureDocument;
use crate::folder::Folder;

/// The full contents of a folder-shared link, flattened.
///
/// The backend performs the recursive expansion server-side; parent/child
/// relationships are re-derived locally from `parent_id` pointers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder the link points at.
    pub root_folder: Folder,
    /// Every folder in the tree (root included or not; dedup is local).
    pub folders: Vec<Folder>,
    /// Every document in the tree, each tagged with its `folder_id`.
    pub documents: Vec<SecureDocument>,
}
