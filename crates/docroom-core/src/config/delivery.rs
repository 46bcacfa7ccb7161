//! Content delivery configuration: URL TTL windows, cache behavior,
//! fallback retries, and viewer session lifetime.

use serde::{Deserialize, Serialize};

/// Settings for signed-URL issuance, caching, and gate sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Default TTL requested for video content URLs, in seconds (6 hours).
    #[serde(default = "default_video_ttl")]
    pub video_url_ttl_seconds: u64,
    /// Default TTL requested for non-video content URLs, in seconds (24 hours).
    #[serde(default = "default_url_ttl")]
    pub default_url_ttl_seconds: u64,
    /// Safety margin subtracted from a cached URL's TTL on lookup, in seconds.
    /// An entry within this margin of expiry is treated as a miss.
    #[serde(default = "default_safety_margin")]
    pub cache_safety_margin_seconds: u64,
    /// Interval for the optional cache/session sweep task, in seconds.
    /// `0` disables the sweep; stale entries then expire passively on read.
    #[serde(default)]
    pub sweep_interval_seconds: u64,
    /// Maximum attempts per item on the per-item fallback path.
    #[serde(default = "default_max_attempts")]
    pub fallback_max_attempts: u32,
    /// Base delay for linear fallback backoff, in milliseconds.
    /// Attempt `n` waits `n × base` before the next attempt.
    #[serde(default = "default_base_delay")]
    pub fallback_base_delay_ms: u64,
    /// Idle lifetime of a viewer gate session, in seconds.
    #[serde(default = "default_session_idle")]
    pub session_idle_timeout_seconds: u64,
    /// Maximum folder nesting depth accepted from the backend.
    #[serde(default = "default_max_folder_depth")]
    pub max_folder_depth: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            video_url_ttl_seconds: default_video_ttl(),
            default_url_ttl_seconds: default_url_ttl(),
            cache_safety_margin_seconds: default_safety_margin(),
            sweep_interval_seconds: 0,
            fallback_max_attempts: default_max_attempts(),
            fallback_base_delay_ms: default_base_delay(),
            session_idle_timeout_seconds: default_session_idle(),
            max_folder_depth: default_max_folder_depth(),
        }
    }
}

fn default_video_ttl() -> u64 {
    21_600
}

fn default_url_ttl() -> u64 {
    86_400
}

fn default_safety_margin() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    250
}

fn default_session_idle() -> u64 {
    1800
}

fn default_max_folder_depth() -> usize {
    64
}
