//! In-memory signed-URL store with per-entry TTL checked on read.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use docroom_entity::SignedUrl;

use crate::keys;

/// A previously issued signed URL with its validity window.
#[derive(Debug, Clone)]
pub struct CachedUrlEntry {
    /// The storage path the URL was issued for.
    pub storage_path: String,
    /// The fetchable URL.
    pub url: String,
    /// Whether the content is video.
    pub is_video: bool,
    /// When the URL was issued (cached).
    pub issued_at: DateTime<Utc>,
    /// Declared validity window in seconds.
    pub ttl_seconds: u64,
}

impl CachedUrlEntry {
    /// Absolute expiry instant of the underlying URL.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(self.ttl_seconds as i64)
    }

    /// Whether the entry may still be served at `now`, keeping `margin`
    /// seconds of slack so a URL is never handed out moments before the
    /// store invalidates it.
    pub fn is_fresh(&self, now: DateTime<Utc>, margin_seconds: u64) -> bool {
        now < self.expires_at() - Duration::seconds(margin_seconds as i64)
    }

    /// Whole seconds of validity remaining at `now` (zero when lapsed).
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        let remaining = (self.expires_at() - now).num_seconds();
        remaining.max(0) as u64
    }
}

/// Process-wide signed-URL cache.
///
/// Local to one running instance. Entries expire passively: a lapsed entry
/// is never returned from [`get`](Self::get) but stays in memory until
/// overwritten or swept via [`purge_expired`](Self::purge_expired).
#[derive(Debug)]
pub struct SignedUrlCache {
    entries: DashMap<String, CachedUrlEntry>,
    safety_margin_seconds: u64,
}

impl SignedUrlCache {
    /// Create an empty cache with the given freshness safety margin.
    pub fn new(safety_margin_seconds: u64) -> Self {
        Self {
            entries: DashMap::new(),
            safety_margin_seconds,
        }
    }

    /// Look up a fresh URL for a storage path and content class.
    pub fn get(&self, storage_path: &str, is_video: bool) -> Option<SignedUrl> {
        self.get_at(storage_path, is_video, Utc::now())
    }

    /// Look up with an explicit clock, used by tests and the sweep.
    pub fn get_at(
        &self,
        storage_path: &str,
        is_video: bool,
        now: DateTime<Utc>,
    ) -> Option<SignedUrl> {
        let key = keys::signed_url(storage_path, is_video);
        let entry = self.entries.get(&key)?;
        if !entry.is_fresh(now, self.safety_margin_seconds) {
            debug!(storage_path, "Cached URL lapsed, treating as miss");
            return None;
        }
        Some(SignedUrl {
            storage_path: entry.storage_path.clone(),
            url: entry.url.clone(),
            expires_in: entry.remaining_seconds(now),
            is_video: entry.is_video,
        })
    }

    /// Store a freshly issued URL under its storage path and content class.
    ///
    /// `ttl_seconds` must be the TTL the signing response declared, not the
    /// TTL that was requested.
    pub fn insert(&self, signed: &SignedUrl) {
        self.insert_at(signed, Utc::now());
    }

    /// Insert with an explicit issuance instant, used by tests.
    pub fn insert_at(&self, signed: &SignedUrl, issued_at: DateTime<Utc>) {
        let key = keys::signed_url(&signed.storage_path, signed.is_video);
        self.entries.insert(
            key,
            CachedUrlEntry {
                storage_path: signed.storage_path.clone(),
                url: signed.url.clone(),
                is_video: signed.is_video,
                issued_at,
                ttl_seconds: signed.expires_in,
            },
        );
    }

    /// Drop every entry whose URL has lapsed. Returns the number removed.
    ///
    /// Optional: correctness does not depend on sweeping, only memory use.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.is_fresh(now, self.safety_margin_seconds));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "Purged lapsed signed-URL cache entries");
        }
        removed
    }

    /// Number of entries currently held (fresh or not).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed(path: &str, ttl: u64) -> SignedUrl {
        SignedUrl {
            storage_path: path.to_string(),
            url: format!("https://cdn.example/{path}?sig=abc"),
            expires_in: ttl,
            is_video: false,
        }
    }

    #[test]
    fn test_fresh_entry_is_returned_with_remaining_ttl() {
        let cache = SignedUrlCache::new(0);
        let issued = Utc::now();
        cache.insert_at(&signed("a/doc.pdf", 600), issued);

        let hit = cache
            .get_at("a/doc.pdf", false, issued + Duration::seconds(100))
            .expect("expected a hit");
        assert_eq!(hit.expires_in, 500);
        assert_eq!(hit.url, "https://cdn.example/a/doc.pdf?sig=abc");
    }

    #[test]
    fn test_lapsed_entry_is_never_returned() {
        let cache = SignedUrlCache::new(0);
        let issued = Utc::now();
        cache.insert_at(&signed("a/doc.pdf", 600), issued);

        assert!(
            cache
                .get_at("a/doc.pdf", false, issued + Duration::seconds(600))
                .is_none()
        );
        assert!(
            cache
                .get_at("a/doc.pdf", false, issued + Duration::seconds(601))
                .is_none()
        );
    }

    #[test]
    fn test_safety_margin_shortens_freshness() {
        let cache = SignedUrlCache::new(60);
        let issued = Utc::now();
        cache.insert_at(&signed("a/doc.pdf", 600), issued);

        assert!(
            cache
                .get_at("a/doc.pdf", false, issued + Duration::seconds(539))
                .is_some()
        );
        assert!(
            cache
                .get_at("a/doc.pdf", false, issued + Duration::seconds(540))
                .is_none()
        );
    }

    #[test]
    fn test_content_classes_cache_independently() {
        let cache = SignedUrlCache::new(0);
        let mut video = signed("a/clip.mp4", 600);
        video.is_video = true;
        cache.insert(&video);

        assert!(cache.get("a/clip.mp4", true).is_some());
        assert!(cache.get("a/clip.mp4", false).is_none());
    }

    #[test]
    fn test_purge_removes_only_lapsed_entries() {
        let cache = SignedUrlCache::new(0);
        let now = Utc::now();
        cache.insert_at(&signed("keep.pdf", 3600), now);
        cache.insert_at(&signed("drop.pdf", 0), now - Duration::seconds(10));

        let removed = cache.purge_expired();
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("keep.pdf", false).is_some());
    }

    #[test]
    fn test_insert_overwrites_previous_entry() {
        let cache = SignedUrlCache::new(0);
        let issued = Utc::now();
        cache.insert_at(&signed("a/doc.pdf", 10), issued);
        let mut renewed = signed("a/doc.pdf", 900);
        renewed.url = "https://cdn.example/a/doc.pdf?sig=fresh".to_string();
        cache.insert_at(&renewed, issued);

        let hit = cache.get_at("a/doc.pdf", false, issued).unwrap();
        assert_eq!(hit.url, "https://cdn.example/a/doc.pdf?sig=fresh");
    }
}
