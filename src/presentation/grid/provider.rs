//! Per-cell image provisioning for the photo grid.
//!
//! Resolution order: disk tier existence check, memory tier, then an
//! asynchronous promotion read or network fetch. Asynchronous results are
//! delivered as [`GridImageEvent`]s on a channel drained by the presentation
//! loop; worker tasks never touch grid state directly.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{ImageData, ImageKey, ImageSource};
use crate::domain::errors::FetchError;
use crate::domain::ports::{AnalyticsPort, ImageCachePort, ImageFetcherPort};

/// Default maximum concurrent downloads.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Identifies one cell of one grid binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellTicket {
    /// Binding generation the request was issued under.
    pub generation: u64,
    /// Cell index.
    pub cell: usize,
}

impl CellTicket {
    #[must_use]
    pub const fn new(generation: u64, cell: usize) -> Self {
        Self { generation, cell }
    }
}

/// Immediate answer to a cell request.
#[derive(Debug, Clone)]
pub enum CellImage {
    /// Served from the memory tier.
    Ready(ImageData),
    /// Will arrive as a [`GridImageEvent`].
    Pending,
}

/// Message sent when an asynchronous cell request completes.
#[derive(Debug, Clone)]
pub struct GridImageEvent {
    /// Cell the image was requested for.
    pub ticket: CellTicket,
    /// Cache key of the image.
    pub key: ImageKey,
    /// The image, or `None` if it could not be loaded.
    pub image: Option<ImageData>,
    /// Tier or network the image was loaded from.
    pub source: ImageSource,
}

/// Resolves displayable images for grid cells without blocking the caller.
///
/// Concurrent requests for the same key share a single load; every waiting
/// cell gets its own event.
pub struct GridImageProvider {
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    analytics: Option<Arc<dyn AnalyticsPort>>,
    event_tx: mpsc::UnboundedSender<GridImageEvent>,
    in_flight: Arc<Mutex<HashMap<ImageKey, Vec<CellTicket>>>>,
    semaphore: Arc<Semaphore>,
}

impl std::fmt::Debug for GridImageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridImageProvider")
            .field("in_flight", &self.in_flight.lock().len())
            .field("available_permits", &self.semaphore.available_permits())
            .finish_non_exhaustive()
    }
}

/// State moved into a background load task.
struct LoadTask {
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    analytics: Option<Arc<dyn AnalyticsPort>>,
    event_tx: mpsc::UnboundedSender<GridImageEvent>,
    in_flight: Arc<Mutex<HashMap<ImageKey, Vec<CellTicket>>>>,
    semaphore: Arc<Semaphore>,
}

impl GridImageProvider {
    /// Creates a provider delivering asynchronous results to `event_tx`.
    #[must_use]
    pub fn new(
        cache: Arc<dyn ImageCachePort>,
        fetcher: Arc<dyn ImageFetcherPort>,
        max_concurrent_fetches: usize,
        event_tx: &mpsc::UnboundedSender<GridImageEvent>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            analytics: None,
            event_tx: event_tx.clone(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            semaphore: Arc::new(Semaphore::new(max_concurrent_fetches.max(1))),
        }
    }

    /// Reports fetch failures to `analytics`.
    #[must_use]
    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsPort>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Resolves the image for one cell.
    ///
    /// Returns [`CellImage::Ready`] on a memory hit. Otherwise a promotion
    /// read or a network fetch is started (or joined, if one is already
    /// running for the same key) and the result arrives as an event.
    pub async fn resolve(&self, ticket: CellTicket, locator: &str) -> CellImage {
        let key = ImageKey::from_locator(locator);

        let on_disk = self.cache.exists(&key).await;

        if let Some(image) = self.cache.read_memory(&key) {
            trace!(id = %key, cell = ticket.cell, "Cell served from memory");
            return CellImage::Ready(image);
        }

        if self.join(&key, ticket) {
            let source = if on_disk {
                ImageSource::DiskCache
            } else {
                ImageSource::Network
            };
            debug!(id = %key, cell = ticket.cell, %source, "Starting image load");
            tokio::spawn(self.task().run(key, locator.to_string(), on_disk));
        } else {
            trace!(id = %key, cell = ticket.cell, "Joined in-flight load");
        }

        CellImage::Pending
    }

    /// Returns true if a load for `locator` is running.
    #[must_use]
    pub fn is_loading(&self, locator: &str) -> bool {
        self.in_flight
            .lock()
            .contains_key(&ImageKey::from_locator(locator))
    }

    /// Returns the number of keys being loaded.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Registers `ticket` as waiting on `key`. Returns true if the caller
    /// must start the load.
    fn join(&self, key: &ImageKey, ticket: CellTicket) -> bool {
        match self.in_flight.lock().entry(key.clone()) {
            Entry::Occupied(mut waiters) => {
                waiters.get_mut().push(ticket);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(vec![ticket]);
                true
            }
        }
    }

    fn task(&self) -> LoadTask {
        LoadTask {
            cache: self.cache.clone(),
            fetcher: self.fetcher.clone(),
            analytics: self.analytics.clone(),
            event_tx: self.event_tx.clone(),
            in_flight: self.in_flight.clone(),
            semaphore: self.semaphore.clone(),
        }
    }
}

impl LoadTask {
    async fn run(self, key: ImageKey, locator: String, on_disk: bool) {
        let promoted = if on_disk {
            self.cache.promote(&key).await
        } else {
            None
        };

        let (image, source) = match promoted {
            Some(image) => (Some(image), ImageSource::DiskCache),
            None => (self.fetch(&key, &locator).await, ImageSource::Network),
        };

        let waiters = self.in_flight.lock().remove(&key).unwrap_or_default();
        for ticket in waiters {
            let event = GridImageEvent {
                ticket,
                key: key.clone(),
                image: image.clone(),
                source,
            };
            if self.event_tx.send(event).is_err() {
                trace!(id = %key, "Grid gone, dropping image event");
                break;
            }
        }
    }

    /// Fetches, then stores on success. Failed keys are never cached.
    async fn fetch(&self, key: &ImageKey, locator: &str) -> Option<ImageData> {
        let result = match self.semaphore.acquire().await {
            Ok(_permit) => self.fetcher.fetch(locator).await,
            Err(e) => {
                error!(error = %e, "Fetch semaphore closed");
                Err(FetchError::network("fetch queue closed"))
            }
        };

        match result {
            Ok(image) => {
                self.cache.store(key, image.clone()).await;
                debug!(id = %key, source = "network", "Image loaded successfully");
                Some(image)
            }
            Err(e) => {
                warn!(id = %key, url = %locator, error = %e, "Image fetch failed");
                if let Some(analytics) = &self.analytics {
                    analytics.report(&format!("image fetch failed for {locator}: {e}"));
                }
                None
            }
        }
    }
}
