//! Two-tier image cache: memory in front of disk.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{ImageData, ImageKey};
use crate::domain::ports::{CacheResult, ImageCachePort};

use super::disk_cache::DiskImageCache;
use super::memory_cache::{CacheStats, MemoryImageCache};

/// Memory and disk tiers behind a single [`ImageCachePort`].
pub struct ImageCache {
    memory: MemoryImageCache,
    disk: Arc<DiskImageCache>,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("dir", &self.disk.dir())
            .field("memory_entries", &self.memory.len())
            .field("disk_entries", &self.disk.len())
            .finish()
    }
}

impl ImageCache {
    /// Creates a cache over an opened disk tier.
    #[must_use]
    pub fn new(memory_capacity: usize, disk: Arc<DiskImageCache>) -> Self {
        Self {
            memory: MemoryImageCache::new(memory_capacity),
            disk,
        }
    }

    /// Opens a cache using the default disk location.
    ///
    /// # Errors
    /// Returns error if the disk tier cannot be opened.
    pub async fn open_default(memory_capacity: usize) -> CacheResult<Self> {
        let disk = DiskImageCache::default_location().await?;
        Ok(Self::new(memory_capacity, Arc::new(disk)))
    }

    /// Returns memory tier statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.memory.stats()
    }

    /// Returns the number of persisted entries.
    #[must_use]
    pub fn disk_len(&self) -> usize {
        self.disk.len()
    }

    /// Removes `key` from both tiers.
    pub async fn evict(&self, key: &ImageKey) {
        self.memory.evict(key);
        self.disk.evict(key).await;
    }

    /// Clears both tiers.
    pub async fn clear(&self) {
        self.memory.clear();
        if let Err(e) = self.disk.clear().await {
            warn!(error = %e, "Failed to clear disk cache");
        }
        info!("Cleared all image caches");
    }
}

#[async_trait::async_trait]
impl ImageCachePort for ImageCache {
    async fn exists(&self, key: &ImageKey) -> bool {
        self.disk.contains(key).await
    }

    fn read_memory(&self, key: &ImageKey) -> Option<ImageData> {
        self.memory.get(key)
    }

    async fn promote(&self, key: &ImageKey) -> Option<ImageData> {
        let data = match self.disk.get(key).await {
            Ok(data) => data?,
            Err(e) => {
                warn!(id = %key, error = %e, "Disk entry unusable, refetching");
                return None;
            }
        };
        self.memory.put(key.clone(), data.clone());
        debug!(id = %key, "Promoted image from disk to memory");
        Some(data)
    }

    async fn store(&self, key: &ImageKey, image: ImageData) {
        self.memory.put(key.clone(), image.clone());
        if let Err(e) = self.disk.put_bytes(key, &image.bytes).await {
            warn!(id = %key, error = %e, "Failed to cache to disk");
        }
    }
}
