//! Image provisioning infrastructure.
//!
//! This module provides:
//! - Memory tier with LRU eviction
//! - Disk tier for persistence
//! - The combined two-tier cache
//! - HTTP fetching of base64 image payloads

pub mod disk_cache;
pub mod fetcher;
pub mod image_cache;
pub mod memory_cache;

pub use disk_cache::DiskImageCache;
pub use fetcher::{HttpImageFetcher, decode_payload};
pub use image_cache::ImageCache;
pub use memory_cache::{CacheStats, MemoryImageCache};
