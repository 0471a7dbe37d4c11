//! Port definitions for image caching and fetching.

use crate::domain::entities::{ImageData, ImageKey};
use crate::domain::errors::FetchError;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur inside a cache tier.
/// Callers of [`ImageCachePort::store`] never see these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Failed to decode a persisted image.
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
}

/// Two-tier (memory, disk) image cache.
/// Implementations must be safe for concurrent stores; last writer wins.
#[async_trait::async_trait]
pub trait ImageCachePort: Send + Sync {
    /// Returns true if the disk tier holds data for `key`. Side-effect free.
    async fn exists(&self, key: &ImageKey) -> bool;

    /// Reads the memory tier only.
    fn read_memory(&self, key: &ImageKey) -> Option<ImageData>;

    /// Reads the disk tier, decodes and inserts the image into the memory tier.
    async fn promote(&self, key: &ImageKey) -> Option<ImageData>;

    /// Writes `image` into both tiers, overwriting any prior entry.
    /// Persistence failures are logged, never returned.
    async fn store(&self, key: &ImageKey, image: ImageData);
}

/// Port for retrieving images from the remote backend.
#[async_trait::async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads and decodes the image at `locator`. A single attempt.
    async fn fetch(&self, locator: &str) -> Result<ImageData, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::domain::entities::image::test_support::sample_image;

    /// Mock fetcher serving a solid image for every locator unless told to fail.
    #[derive(Default)]
    pub struct MockImageFetcher {
        failures: Mutex<HashMap<String, FetchError>>,
        calls: Arc<Mutex<Vec<String>>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockImageFetcher {
        /// Creates mock that answers immediately.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates mock that sleeps before answering.
        pub fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        /// Makes every fetch of `locator` fail with `error`.
        pub fn fail(&self, locator: &str, error: FetchError) {
            self.failures.lock().insert(locator.to_string(), error);
        }

        /// Number of fetches issued so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        /// Number of fetches issued for `locator`.
        pub fn calls_for(&self, locator: &str) -> usize {
            self.calls.lock().iter().filter(|l| *l == locator).count()
        }

        /// Highest number of fetches that were running at the same time.
        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, locator: &str) -> Result<ImageData, FetchError> {
            self.calls.lock().push(locator.to_string());
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(running, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if let Some(err) = self.failures.lock().get(locator) {
                return Err(err.clone());
            }
            Ok(sample_image(4, 4))
        }
    }
}
