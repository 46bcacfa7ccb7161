//! # docroom-cache
//!
//! Process-wide cache of previously issued signed URLs, keyed by storage
//! path and content class. Entries carry their own issuance time and TTL
//! and are checked for freshness on every read; nothing is evicted unless
//! the optional sweep is enabled, so a stale entry is simply never
//! returned as a hit.

pub mod keys;
pub mod store;

pub use store::{CachedUrlEntry, SignedUrlCache};
