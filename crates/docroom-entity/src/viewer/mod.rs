//! Viewer identity and NDA signature value objects.

pub mod model;

pub use model::{NdaSignature, ViewerIdentity};
