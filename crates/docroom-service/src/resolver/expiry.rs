//! URL validity window computation.

use chrono::{DateTime, Utc};

use docroom_core::config::delivery::DeliveryConfig;
use docroom_core::types::FileClass;

/// Validity window to request for one document's URL.
///
/// The class default (6 h for video, 24 h otherwise) is capped by the
/// link's own remaining lifetime so a URL never outlives its link.
pub fn url_ttl_seconds(
    class: FileClass,
    link_expires_at: Option<DateTime<Utc>>,
    config: &DeliveryConfig,
    now: DateTime<Utc>,
) -> u64 {
    let default = if class.is_video() {
        config.video_url_ttl_seconds
    } else {
        config.default_url_ttl_seconds
    };
    match link_expires_at {
        Some(expires) => {
            let remaining = (expires - now).num_seconds().max(0) as u64;
            default.min(remaining)
        }
        None => default,
    }
}
