//! Shared types used across DocRoom crates.

pub mod file_class;
pub mod sorting;

pub use file_class::FileClass;
pub use sorting::DocumentSort;
