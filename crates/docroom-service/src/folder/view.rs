//! Pure, stateless transforms over an aggregated document set.
//!
//! None of these mutate the underlying tree index; they take the selected
//! set and return a new one.

use docroom_core::types::{DocumentSort, FileClass};
use docroom_entity::SecureDocument;

/// Keep documents whose file name contains `query`, case-insensitively.
pub fn filter_by_name(documents: &[SecureDocument], query: &str) -> Vec<SecureDocument> {
    let needle = query.to_lowercase();
    documents
        .iter()
        .filter(|d| d.file_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Keep documents of one content class.
pub fn filter_by_class(documents: &[SecureDocument], class: FileClass) -> Vec<SecureDocument> {
    documents
        .iter()
        .filter(|d| d.file_class() == class)
        .cloned()
        .collect()
}

/// Sort a document set in place.
pub fn sort_documents(documents: &mut [SecureDocument], sort: DocumentSort) {
    match sort {
        DocumentSort::NameAsc => {
            documents.sort_by(|a, b| a.file_name.to_lowercase().cmp(&b.file_name.to_lowercase()));
        }
        DocumentSort::NameDesc => {
            documents.sort_by(|a, b| b.file_name.to_lowercase().cmp(&a.file_name.to_lowercase()));
        }
        DocumentSort::CreatedAsc => documents.sort_by_key(|d| d.created_at),
        DocumentSort::CreatedDesc => {
            documents.sort_by_key(|d| std::cmp::Reverse(d.created_at));
        }
        DocumentSort::ClassGrouped => {
            documents.sort_by(|a, b| {
                class_rank(a.file_class())
                    .cmp(&class_rank(b.file_class()))
                    .then_with(|| a.file_name.to_lowercase().cmp(&b.file_name.to_lowercase()))
            });
        }
    }
}

/// Display order of class groups.
fn class_rank(class: FileClass) -> u8 {
    match class {
        FileClass::Pdf => 0,
        FileClass::Document => 1,
        FileClass::Image => 2,
        FileClass::Video => 3,
        FileClass::Audio => 4,
        FileClass::Other => 5,
    }
}
