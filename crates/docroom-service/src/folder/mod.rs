//! Folder tree aggregation and document-set transforms.

pub mod aggregator;
pub mod view;

pub use aggregator::FolderTreeIndex;
pub use view::{filter_by_class, filter_by_name, sort_documents};
