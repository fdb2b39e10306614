//! Versioned, TTL-bound cache over a pluggable key/value store.
//!
//! The store itself is dumb string storage behind [`CacheStore`]; the typed
//! layer ([`get_cached`]/[`put_cached`]) wraps every payload in a
//! [`CacheEntry`] carrying its schema version and expiry. A version
//! mismatch, an expired clock, and a corrupt entry are all the same thing:
//! a miss, and the stale entry is deleted on the spot.
//!
//! Caching is an optimization, never a correctness requirement, so a store
//! that fails to persist logs a warning and the write is dropped.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fixed prefix under which every cache key lives.
pub const CACHE_PREFIX: &str = "lsd";

/// Bumped whenever a cached payload's shape changes; older entries then
/// read as misses and self-heal away.
pub const CACHE_SCHEMA_VERSION: u32 = 3;

/// TTL for wage and employment data, which the source updates annually.
pub const WAGE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL for snapshot inputs (openings, unemployment, price index), which
/// move monthly and get revised.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(60 * 60);

/// Raw string storage. Implementations must tolerate concurrent access;
/// reads and writes are atomic per key, last write wins.
pub trait CacheStore: Send + Sync {
    /// Returns the stored string for `key`, if present.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Inserts or overwrites an entry. Storage failure is an `Err`, which
    /// the typed layer swallows.
    fn put_raw(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes an entry if present.
    fn remove(&self, key: &str);

    /// Removes every entry whose key starts with `prefix`, returning the
    /// number removed.
    fn clear_all(&self, prefix: &str) -> usize;
}

/// A stored payload with its freshness metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub version: u32,
}

/// Builds a cache key from explicit ordered parts, joined under
/// [`CACHE_PREFIX`]. Never derived from map serialization, so key identity
/// cannot depend on field ordering.
pub fn cache_key(parts: &[&str]) -> String {
    let mut key = String::from(CACHE_PREFIX);
    for part in parts {
        key.push(':');
        key.push_str(part);
    }
    key
}

/// Reads a typed entry, treating expiry, version mismatch, and parse
/// failure identically: the stale entry is removed and the read misses.
pub fn get_cached<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key)?;
    let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("evicting unreadable cache entry {}: {}", key, e);
            store.remove(key);
            return None;
        }
    };
    if entry.version != CACHE_SCHEMA_VERSION || Utc::now() >= entry.expires_at {
        tracing::debug!("evicting stale cache entry {}", key);
        store.remove(key);
        return None;
    }
    Some(entry.data)
}

/// Writes a typed entry with the given TTL. Overwrites unconditionally;
/// storage failures are logged and swallowed.
pub fn put_cached<T: Serialize>(store: &dyn CacheStore, key: &str, data: &T, ttl: Duration) {
    let now = Utc::now();
    let entry = CacheEntry {
        data,
        cached_at: now,
        expires_at: now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero()),
        version: CACHE_SCHEMA_VERSION,
    };
    let json = match serde_json::to_string(&entry) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed to serialize cache entry {}: {}", key, e);
            return;
        }
    };
    if let Err(e) = store.put_raw(key, &json) {
        tracing::warn!("failed to persist cache entry {}: {}", key, e);
    }
}

/// Thread-safe in-memory store backed by `DashMap`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    store: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> MemoryCache {
        MemoryCache::default()
    }
}

impl CacheStore for MemoryCache {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.store.get(key).map(|v| v.clone())
    }

    fn put_raw(&self, key: &str, value: &str) -> io::Result<()> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    fn clear_all(&self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .store
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        let mut removed = 0;
        for key in keys {
            if self.store.remove(&key).is_some() {
                removed += 1;
            }
        }
        removed
    }
}

/// On-disk store: one JSON file per key under a cache directory.
///
/// The directory is created on first write. Filesystem failures surface as
/// `Err` from `put_raw` (swallowed upstream) or as plain misses on read.
#[derive(Debug)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> DiskCache {
        DiskCache { dir: dir.into() }
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl CacheStore for DiskCache {
    fn get_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_for(key)).ok()
    }

    fn put_raw(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file_for(key), value)
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.file_for(key));
    }

    fn clear_all(&self, prefix: &str) -> usize {
        let sanitized = sanitize_key(prefix);
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&*sanitized) && fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
        removed
    }
}

/// Keys contain `:`; file names should not.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        n: i64,
    }

    #[test]
    fn key_building_is_ordered_and_prefixed() {
        assert_eq!(
            cache_key(&["wages", "151252", "N0000000"]),
            "lsd:wages:151252:N0000000"
        );
        assert_eq!(cache_key(&["snapshot"]), "lsd:snapshot");
    }

    #[test]
    fn typed_round_trip() {
        let store = MemoryCache::new();
        put_cached(&store, "lsd:t:1", &Payload { n: 42 }, WAGE_TTL);
        assert_eq!(get_cached::<Payload>(&store, "lsd:t:1"), Some(Payload { n: 42 }));
    }

    #[test]
    fn expired_entry_misses_and_self_heals() {
        let store = MemoryCache::new();
        let now = Utc::now();
        let entry = CacheEntry {
            data: Payload { n: 1 },
            cached_at: now - chrono::Duration::hours(2),
            expires_at: now - chrono::Duration::hours(1),
            version: CACHE_SCHEMA_VERSION,
        };
        store
            .put_raw("lsd:t:stale", &serde_json::to_string(&entry).unwrap())
            .unwrap();

        assert_eq!(get_cached::<Payload>(&store, "lsd:t:stale"), None);
        // Deleted on read, not just skipped.
        assert_eq!(store.get_raw("lsd:t:stale"), None);
    }

    #[test]
    fn version_bump_alone_forces_a_miss() {
        let store = MemoryCache::new();
        let now = Utc::now();
        let entry = CacheEntry {
            data: Payload { n: 1 },
            cached_at: now,
            expires_at: now + chrono::Duration::hours(1),
            version: CACHE_SCHEMA_VERSION - 1,
        };
        store
            .put_raw("lsd:t:old", &serde_json::to_string(&entry).unwrap())
            .unwrap();

        assert_eq!(get_cached::<Payload>(&store, "lsd:t:old"), None);
        assert_eq!(store.get_raw("lsd:t:old"), None);
    }

    #[test]
    fn corrupt_entry_is_deleted_and_misses() {
        let store = MemoryCache::new();
        store.put_raw("lsd:t:bad", "{not json").unwrap();
        assert_eq!(get_cached::<Payload>(&store, "lsd:t:bad"), None);
        assert_eq!(store.get_raw("lsd:t:bad"), None);
    }

    #[test]
    fn clear_all_counts_prefix_matches_only() {
        let store = MemoryCache::new();
        put_cached(&store, "lsd:wages:a", &Payload { n: 1 }, WAGE_TTL);
        put_cached(&store, "lsd:wages:b", &Payload { n: 2 }, WAGE_TTL);
        put_cached(&store, "other:c", &Payload { n: 3 }, WAGE_TTL);

        assert_eq!(store.clear_all(CACHE_PREFIX), 2);
        assert_eq!(store.get_raw("lsd:wages:a"), None);
        assert!(store.get_raw("other:c").is_some());
    }

    #[test]
    fn disk_cache_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskCache::new(dir.path());

        put_cached(&store, "lsd:wages:151252", &Payload { n: 9 }, WAGE_TTL);
        assert_eq!(
            get_cached::<Payload>(&store, "lsd:wages:151252"),
            Some(Payload { n: 9 })
        );

        assert_eq!(store.clear_all(CACHE_PREFIX), 1);
        assert_eq!(get_cached::<Payload>(&store, "lsd:wages:151252"), None);
    }

    #[test]
    fn disk_cache_missing_dir_reads_as_miss() {
        let store = DiskCache::new("/nonexistent/laborstat-cache");
        assert_eq!(store.get_raw("lsd:any"), None);
        assert_eq!(store.clear_all(CACHE_PREFIX), 0);
    }
}
