//! Disk tier of the image cache.
//!
//! One file per [`ImageKey`], holding the encoded bytes exactly as fetched.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::fs;
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{ImageData, ImageKey};
use crate::domain::ports::{CacheError, CacheResult};

const ENTRY_EXTENSION: &str = "img";
const PARTIAL_EXTENSION: &str = "part";

#[derive(Debug, Default, Clone, Copy)]
struct Usage {
    entries: usize,
    bytes: u64,
}

impl Usage {
    fn replace(&mut self, previous: Option<u64>, size: u64) {
        match previous {
            Some(old) => self.bytes = self.bytes.saturating_sub(old) + size,
            None => {
                self.entries += 1;
                self.bytes += size;
            }
        }
    }

    fn remove(&mut self, size: u64) {
        self.entries = self.entries.saturating_sub(1);
        self.bytes = self.bytes.saturating_sub(size);
    }
}

fn io_error(context: &'static str) -> impl FnOnce(std::io::Error) -> CacheError {
    move |e| CacheError::IoError(format!("{context}: {e}"))
}

fn join_error(e: tokio::task::JoinError) -> CacheError {
    CacheError::IoError(format!("disk task failed: {e}"))
}

/// Entries persist until evicted or cleared.
///
/// Every change to the directory and its [`Usage`] happens on a blocking
/// thread while the usage lock is held, so concurrent writers of one key
/// leave exactly one entry and an accurate byte count.
pub struct DiskImageCache {
    dir: PathBuf,
    usage: Arc<Mutex<Usage>>,
}

impl DiskImageCache {
    /// Opens the cache in `dir`, creating it if needed.
    ///
    /// Leftover partial writes from an interrupted run are removed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or listed.
    pub async fn new(dir: PathBuf) -> CacheResult<Self> {
        fs::create_dir_all(&dir)
            .await
            .map_err(io_error("creating cache dir"))?;

        let mut usage = Usage::default();
        let mut listing = fs::read_dir(&dir)
            .await
            .map_err(io_error("listing cache dir"))?;
        while let Ok(Some(entry)) = listing.next_entry().await {
            let path = entry.path();
            if has_extension(&path, PARTIAL_EXTENSION) {
                let _ = fs::remove_file(&path).await;
            } else if has_extension(&path, ENTRY_EXTENSION)
                && let Ok(meta) = entry.metadata().await
            {
                usage.replace(None, meta.len());
            }
        }

        debug!(path = %dir.display(), entries = usage.entries, bytes = usage.bytes, "Opened disk image cache");
        Ok(Self {
            dir,
            usage: Arc::new(Mutex::new(usage)),
        })
    }

    /// Opens the cache under the platform cache directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn default_location() -> CacheResult<Self> {
        Self::new(default_cache_dir()).await
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &ImageKey) -> PathBuf {
        self.dir.join(format!("{}.{ENTRY_EXTENSION}", key.as_str()))
    }

    pub async fn contains(&self, key: &ImageKey) -> bool {
        fs::try_exists(self.entry_path(key)).await.unwrap_or(false)
    }

    pub async fn get_bytes(&self, key: &ImageKey) -> Option<Vec<u8>> {
        match fs::read(self.entry_path(key)).await {
            Ok(bytes) => {
                trace!(key = %key, size = bytes.len(), "Disk hit");
                Some(bytes)
            }
            Err(_) => {
                trace!(key = %key, "Disk miss");
                None
            }
        }
    }

    /// Reads and decodes an entry off the async runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::DecodeError`] if the entry exists but no longer
    /// decodes. A missing entry is `Ok(None)`.
    pub async fn get(&self, key: &ImageKey) -> CacheResult<Option<ImageData>> {
        let Some(bytes) = self.get_bytes(key).await else {
            return Ok(None);
        };
        tokio::task::spawn_blocking(move || ImageData::decode(bytes))
            .await
            .map_err(|e| CacheError::DecodeError(format!("decode task failed: {e}")))?
            .map(Some)
            .map_err(|e| CacheError::DecodeError(e.to_string()))
    }

    /// Stores `bytes` under `key`, replacing any previous entry.
    ///
    /// Each write goes to its own partial file, which is renamed into place,
    /// so readers never observe a half-written entry.
    ///
    /// # Errors
    /// Returns error if the entry cannot be written.
    pub async fn put_bytes(&self, key: &ImageKey, bytes: &[u8]) -> CacheResult<()> {
        let dir = self.dir.clone();
        let path = self.entry_path(key);
        let usage = self.usage.clone();
        let bytes = bytes.to_vec();
        let size = bytes.len() as u64;

        tokio::task::spawn_blocking(move || -> CacheResult<()> {
            let mut partial = tempfile::Builder::new()
                .suffix(&format!(".{PARTIAL_EXTENSION}"))
                .tempfile_in(&dir)
                .map_err(io_error("creating cache entry"))?;
            partial
                .write_all(&bytes)
                .map_err(io_error("writing cache entry"))?;

            let mut usage = usage.lock();
            let previous = std::fs::metadata(&path).ok().map(|m| m.len());
            partial
                .persist(&path)
                .map_err(|e| io_error("committing cache entry")(e.error))?;
            usage.replace(previous, size);
            Ok(())
        })
        .await
        .map_err(join_error)??;

        debug!(key = %key, size, "Persisted image");
        Ok(())
    }

    pub async fn evict(&self, key: &ImageKey) {
        let path = self.entry_path(key);
        let usage = self.usage.clone();
        let removed = tokio::task::spawn_blocking(move || {
            let mut usage = usage.lock();
            let size = std::fs::metadata(&path)?.len();
            std::fs::remove_file(&path)?;
            usage.remove(size);
            Ok::<_, std::io::Error>(())
        })
        .await;

        match removed {
            Ok(Ok(())) => debug!(key = %key, "Evicted from disk"),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Ok(Err(e)) => warn!(key = %key, error = %e, "Could not evict from disk"),
            Err(e) => error!(key = %key, error = %e, "Evict task failed"),
        }
    }

    /// Deletes every entry in the directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be listed.
    pub async fn clear(&self) -> CacheResult<()> {
        let dir = self.dir.clone();
        let usage = self.usage.clone();
        let removed = tokio::task::spawn_blocking(move || -> CacheResult<usize> {
            let mut usage = usage.lock();
            let mut removed = 0usize;
            for entry in std::fs::read_dir(&dir).map_err(io_error("listing cache dir"))? {
                let path = entry.map_err(io_error("listing cache dir"))?.path();
                if !has_extension(&path, ENTRY_EXTENSION) {
                    continue;
                }
                match std::fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(path = %path.display(), error = %e, "Could not remove entry"),
                }
            }
            *usage = Usage::default();
            Ok(removed)
        })
        .await
        .map_err(join_error)??;

        debug!(removed, "Cleared disk cache");
        Ok(())
    }

    /// Total size of persisted entries in bytes.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.usage.lock().bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.usage.lock().entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// `<platform cache dir>/images`, or a directory under the temp dir when
/// the platform has no cache directory.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "beerdrinkin", "beerdrinkin").map_or_else(
        || std::env::temp_dir().join("beerdrinkin-images"),
        |dirs| dirs.cache_dir().join("images"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::image::test_support::png_bytes;
    use tempfile::TempDir;

    async fn create_test_cache() -> (DiskImageCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskImageCache::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        (cache, temp_dir)
    }

    #[tokio::test]
    async fn test_put_and_get_bytes() {
        let (cache, _temp) = create_test_cache().await;
        let key = ImageKey::new("test1");

        cache.put_bytes(&key, b"test image data").await.unwrap();

        assert_eq!(cache.get_bytes(&key).await.as_deref(), Some(&b"test image data"[..]));
        assert!(cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_get_decodes() {
        let (cache, _temp) = create_test_cache().await;
        let key = ImageKey::new("png");
        cache.put_bytes(&key, &png_bytes(5, 7)).await.unwrap();

        let data = cache.get(&key).await.unwrap().unwrap();
        assert_eq!((data.width(), data.height()), (5, 7));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_decode_error() {
        let (cache, _temp) = create_test_cache().await;
        let key = ImageKey::new("junk");
        cache.put_bytes(&key, b"junk").await.unwrap();

        assert!(matches!(
            cache.get(&key).await,
            Err(CacheError::DecodeError(_))
        ));
        assert!(cache.get(&ImageKey::new("absent")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counters_track_writes() {
        let (cache, _temp) = create_test_cache().await;

        cache.put_bytes(&ImageKey::new("a"), b"hello").await.unwrap();
        cache.put_bytes(&ImageKey::new("b"), b"world!").await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.current_size(), 11);

        cache.put_bytes(&ImageKey::new("a"), b"hey").await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.current_size(), 9);

        cache.evict(&ImageKey::new("b")).await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), 3);

        cache.clear().await.unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.current_size(), 0);
    }

    #[tokio::test]
    async fn test_reopen_counts_existing_entries() {
        let temp_dir = TempDir::new().unwrap();
        {
            let cache = DiskImageCache::new(temp_dir.path().to_path_buf())
                .await
                .unwrap();
            cache.put_bytes(&ImageKey::new("a"), b"1234").await.unwrap();
        }

        let reopened = DiskImageCache::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.current_size(), 4);
    }

    #[tokio::test]
    async fn test_open_discards_partial_writes() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("abc.part"), b"half").unwrap();
        std::fs::write(temp_dir.path().join("def.img"), b"whole").unwrap();

        let cache = DiskImageCache::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert!(!temp_dir.path().join("abc.part").exists());
    }

    #[tokio::test]
    async fn test_evict_missing_is_noop() {
        let (cache, _temp) = create_test_cache().await;
        cache.put_bytes(&ImageKey::new("a"), b"x").await.unwrap();

        cache.evict(&ImageKey::new("nope")).await;

        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_to_one_key() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Arc::new(
            DiskImageCache::new(temp_dir.path().to_path_buf())
                .await
                .unwrap(),
        );
        let key = ImageKey::new("shared");
        let large = vec![b'a'; 200_000];
        let small = vec![b'b'; 1_000];

        for _ in 0..50 {
            let writers = [large.clone(), small.clone()].map(|bytes| {
                let cache = cache.clone();
                let key = key.clone();
                tokio::spawn(async move { cache.put_bytes(&key, &bytes).await })
            });
            for writer in writers {
                writer.await.unwrap().unwrap();
            }
        }

        let stored = cache.get_bytes(&key).await.unwrap();
        assert!(stored == large || stored == small);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.current_size(), stored.len() as u64);
        let leftovers = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter(|e| {
                has_extension(&e.as_ref().unwrap().path(), PARTIAL_EXTENSION)
            })
            .count();
        assert_eq!(leftovers, 0);
    }
}
