//! Rebuilds the folder tree from the backend's flattened contents.
//!
//! The backend expands folder-shared links server-side and returns a flat
//! folder and document list; this index re-derives parent→children and
//! folder→documents maps and memoizes the descendant set of every folder
//! so repeated selections don't re-walk the tree.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;
use uuid::Uuid;

use docroom_entity::{Folder, FolderContents, SecureDocument};

/// Indexed view of one folder-shared tree.
#[derive(Debug, Clone)]
pub struct FolderTreeIndex {
    root_id: Uuid,
    root: Folder,
    folders: HashMap<Uuid, Folder>,
    /// Breadth-first listing order, root first.
    order: Vec<Uuid>,
    children: HashMap<Uuid, Vec<Uuid>>,
    documents: HashMap<Uuid, Vec<SecureDocument>>,
    /// Memoized descendant ids per folder (arena + index pattern).
    descendants: HashMap<Uuid, Vec<Uuid>>,
}

impl FolderTreeIndex {
    /// Build the index from flattened contents.
    ///
    /// Inactive folders are dropped along with everything beneath them.
    /// Traversal is depth-guarded and cycle-guarded even though the
    /// backend promises a tree.
    pub fn build(contents: FolderContents, max_depth: usize) -> Self {
        let FolderContents {
            root_folder,
            folders,
            documents,
        } = contents;
        let root_id = root_folder.id;
        let root = root_folder.clone();

        // The root is the link's target; it is kept regardless of its flag.
        let mut candidates: HashMap<Uuid, Folder> = folders
            .into_iter()
            .filter(|f| f.is_active)
            .map(|f| (f.id, f))
            .collect();
        candidates.insert(root_id, root_folder);

        let mut by_parent: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for folder in candidates.values() {
            if let Some(parent) = folder.parent_id {
                by_parent.entry(parent).or_default().push(folder.id);
            }
        }

        // Breadth-first walk from the root, guarding depth and revisits.
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut queue = VecDeque::from([(root_id, 0usize)]);
        while let Some((folder_id, depth)) = queue.pop_front() {
            if !visited.insert(folder_id) {
                debug!(%folder_id, "Folder revisited during traversal, skipping");
                continue;
            }
            order.push(folder_id);
            if depth >= max_depth {
                debug!(%folder_id, depth, "Folder depth limit reached, not descending");
                continue;
            }
            let mut kids: Vec<Uuid> = by_parent.remove(&folder_id).unwrap_or_default();
            kids.retain(|id| !visited.contains(id));
            for &child in &kids {
                queue.push_back((child, depth + 1));
            }
            children.insert(folder_id, kids);
        }

        let folders: HashMap<Uuid, Folder> = candidates
            .into_iter()
            .filter(|(id, _)| visited.contains(id))
            .collect();

        let mut grouped: HashMap<Uuid, Vec<SecureDocument>> = HashMap::new();
        for document in documents {
            match document.folder_id {
                Some(folder_id) if visited.contains(&folder_id) => {
                    grouped.entry(folder_id).or_default().push(document);
                }
                _ => {
                    debug!(
                        document_id = %document.id,
                        "Document outside the visible tree, dropping"
                    );
                }
            }
        }

        // Children precede parents in reverse BFS order, so each folder's
        // descendant list is assembled once from already-computed lists.
        let mut descendants: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for &folder_id in order.iter().rev() {
            let mut all = Vec::new();
            for &child in children.get(&folder_id).map_or(&[][..], |v| v.as_slice()) {
                all.push(child);
                all.extend(descendants.get(&child).cloned().unwrap_or_default());
            }
            descendants.insert(folder_id, all);
        }

        Self {
            root_id,
            root,
            folders,
            order,
            children,
            documents: grouped,
            descendants,
        }
    }

    /// The link's target folder.
    pub fn root_id(&self) -> Uuid {
        self.root_id
    }

    /// The root folder record.
    pub fn root(&self) -> &Folder {
        &self.root
    }

    /// Whether a folder is part of the visible tree.
    pub fn contains(&self, folder_id: Uuid) -> bool {
        self.folders.contains_key(&folder_id)
    }

    /// All visible folders, root first, in traversal order.
    pub fn folders(&self) -> Vec<Folder> {
        self.order
            .iter()
            .filter_map(|id| self.folders.get(id).cloned())
            .collect()
    }

    /// Direct children of a folder.
    pub fn children_of(&self, folder_id: Uuid) -> &[Uuid] {
        self.children
            .get(&folder_id)
            .map_or(&[][..], |v| v.as_slice())
    }

    /// Documents visible under a folder: its own plus every descendant's,
    /// deduplicated by document id, in stable traversal order.
    pub fn documents_for(&self, folder_id: Uuid) -> Vec<SecureDocument> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        let mut scope = vec![folder_id];
        scope.extend(self.descendants.get(&folder_id).cloned().unwrap_or_default());

        for id in scope {
            if let Some(docs) = self.documents.get(&id) {
                for doc in docs {
                    if seen.insert(doc.id) {
                        result.push(doc.clone());
                    }
                }
            }
        }
        result
    }

    /// Every document in the tree (equivalent to selecting the root).
    pub fn all_documents(&self) -> Vec<SecureDocument> {
        self.documents_for(self.root_id)
    }
}
