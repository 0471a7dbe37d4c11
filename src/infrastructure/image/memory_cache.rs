//! In-memory LRU tier of the image cache.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::{ImageData, ImageKey};

struct Tier {
    entries: LruCache<ImageKey, ImageData>,
    hits: u64,
    misses: u64,
}

/// Decoded images kept for the life of the process.
/// The capacity counts images, not bytes.
pub struct MemoryImageCache {
    tier: Mutex<Tier>,
}

impl MemoryImageCache {
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tier: Mutex::new(Tier {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Looks up `key`, marking it most recently used and counting the lookup.
    pub fn get(&self, key: &ImageKey) -> Option<ImageData> {
        let mut tier = self.tier.lock();
        let found = tier.entries.get(key).cloned();
        if found.is_some() {
            tier.hits += 1;
        } else {
            tier.misses += 1;
        }
        trace!(key = %key, hit = found.is_some(), "Memory lookup");
        found
    }

    pub fn put(&self, key: ImageKey, data: ImageData) {
        let mut tier = self.tier.lock();
        if let Some((dropped, _)) = tier.entries.push(key.clone(), data)
            && dropped != key
        {
            trace!(key = %dropped, "Memory tier full, dropped least recent");
        }
        debug!(key = %key, "Image held in memory");
    }

    pub fn evict(&self, key: &ImageKey) {
        if self.tier.lock().entries.pop(key).is_some() {
            debug!(key = %key, "Evicted from memory");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tier.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every image. Lookup counters are kept.
    pub fn clear(&self) {
        self.tier.lock().entries.clear();
        debug!("Cleared memory tier");
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let tier = self.tier.lock();
        CacheStats {
            hits: tier.hits,
            misses: tier.misses,
            size: tier.entries.len(),
            capacity: tier.entries.cap().get(),
        }
    }
}

/// Snapshot of memory tier counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Percentage of lookups that hit, or zero before the first lookup.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 * 100.0 / total as f64,
        }
    }
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} images, {} hits, {} misses ({:.1}%)",
            self.size,
            self.capacity,
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}
