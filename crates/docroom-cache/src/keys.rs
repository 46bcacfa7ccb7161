//! Cache key builders for signed-URL entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the cache uses.

/// Prefix applied to all DocRoom cache keys.
const PREFIX: &str = "docroom";

/// Cache key for a signed URL by storage path and content class.
///
/// Video and non-video URLs for the same path are signed with different
/// policies, so they cache under distinct keys.
pub fn signed_url(storage_path: &str, is_video: bool) -> String {
    let class = if is_video { "video" } else { "file" };
    format!("{PREFIX}:url:{class}:{storage_path}")
}
