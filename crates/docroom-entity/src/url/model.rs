//! Signed URL request/response value objects.

use serde::{Deserialize, Serialize};

/// A request to convert one storage reference into a fetchable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrlRequest {
    /// Opaque path in the backing store.
    pub storage_path: String,
    /// Whether the content is video (drives the backend's URL policy).
    pub is_video: bool,
    /// Requested validity window in seconds. The backend may shorten it;
    /// the TTL it declares in the response is authoritative.
    pub expires_in: u64,
}

/// A time-limited, directly fetchable URL for one storage reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    /// The storage path this URL was issued for.
    pub storage_path: String,
    /// The fetchable URL.
    pub url: String,
    /// Declared validity window in seconds, counted from issuance.
    pub expires_in: u64,
    /// Whether the content is video.
    pub is_video: bool,
}

/// The result of a consolidated signing exchange.
///
/// Requests absent from `signed_urls` failed; the counts let callers log
/// partial failure without diffing the lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlBatch {
    /// Successfully signed URLs.
    pub signed_urls: Vec<SignedUrl>,
    /// How many items the exchange carried.
    pub total_requested: usize,
    /// How many items were signed.
    pub total_success: usize,
}
