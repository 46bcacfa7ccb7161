//! # docroom-core
//!
//! Core crate for DocRoom. Contains configuration schemas, shared types
//! (content classification, sorting), and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocRoom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
