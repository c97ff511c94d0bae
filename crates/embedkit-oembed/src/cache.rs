//! Lookup cache for discovery responses.
//!
//! Two implementations of [`MetadataCache`]:
//!
//! - [`NoCache`]: always misses, every lookup goes to the network (default)
//! - [`MemoryCache`]: in-process store with a time-to-live and a size bound
//!
//! Keys are full discovery URLs, so a render and a thumbnail lookup for the
//! same resource share one entry.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::metadata::EmbedMetadata;

/// Key-value store for resolved discovery responses.
pub trait MetadataCache: Send + Sync {
    /// Retrieve a cached response for `key`, or `None` on miss or expiry.
    fn get(&self, key: &str) -> Option<EmbedMetadata>;

    /// Store a response, overwriting any previous entry for `key`.
    fn set(&self, key: &str, value: &EmbedMetadata);
}

/// No-op [`MetadataCache`]. Every `get` misses; every `set` is discarded.
pub struct NoCache;

impl MetadataCache for NoCache {
    fn get(&self, _key: &str) -> Option<EmbedMetadata> {
        None
    }

    fn set(&self, _key: &str, _value: &EmbedMetadata) {}
}

struct Entry {
    stored_at: Instant,
    value: EmbedMetadata,
}

/// In-memory [`MetadataCache`] with per-entry expiry.
///
/// When full, expired entries are dropped first, then the oldest entry.
/// A poisoned lock degrades to a cache miss.
pub struct MemoryCache {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Create a cache holding at most `max_entries` responses for `ttl` each.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict(&self, entries: &mut HashMap<String, Entry>) {
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl MetadataCache for MemoryCache {
    fn get(&self, key: &str) -> Option<EmbedMetadata> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: &EmbedMetadata) {
        if self.max_entries == 0 {
            return;
        }
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        if !entries.contains_key(key) {
            self.evict(&mut entries);
        }
        entries.insert(
            key.to_owned(),
            Entry {
                stored_at: Instant::now(),
                value: value.clone(),
            },
        );
    }
}
