// src/cache.rs
//! In-memory last-known-good store for fetched changelog payloads.
//!
//! Holds at most one record per key plus its fetch time, and answers
//! staleness questions. No network or rendering knowledge lives here.
//! Staleness affects presentation only: stale records are still returned,
//! never evicted. `clear` is the only removal path.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::model::ChangeDay;

/// The single well-known key used by the toolkit changelog. The store itself
/// is keyed so additional changelogs can coexist without a contract change.
pub const TOOLKIT_CACHE_KEY: &str = "toolkit-changelog";

/// Freshness window; beyond this a hit is flagged for a "stale" banner.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct CacheRecord {
    pub data: Vec<ChangeDay>,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct FetchCache {
    inner: Mutex<HashMap<String, CacheRecord>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, key: &str) -> Option<CacheRecord> {
        let map = self.inner.lock().expect("fetch cache mutex poisoned");
        map.get(key).cloned()
    }

    /// Overwrites unconditionally; last writer wins.
    pub fn write(&self, key: &str, data: Vec<ChangeDay>, now: DateTime<Utc>) {
        let mut map = self.inner.lock().expect("fetch cache mutex poisoned");
        map.insert(key.to_string(), CacheRecord { data, cached_at: now });
    }

    /// Removes the record so the next `read` reports absent. Used by tests
    /// and by forced refresh.
    pub fn clear(&self, key: &str) {
        let mut map = self.inner.lock().expect("fetch cache mutex poisoned");
        map.remove(key);
    }

    /// A record is stale when `now - cached_at > ttl`. Stale records remain
    /// usable; the flag only drives the banner shown to the viewer.
    pub fn is_stale(record: &CacheRecord, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(record.cached_at);
        match age.to_std() {
            Ok(age) => age > ttl,
            // cached_at in the future (clock skew): not stale
            Err(_) => false,
        }
    }
}
