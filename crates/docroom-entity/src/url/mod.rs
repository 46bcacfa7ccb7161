//! Signed URL value objects.

pub mod model;

pub use model::{SignedUrl, SignedUrlBatch, SignedUrlRequest};
