//! Infrastructure layer with adapters for external services.

/// Telemetry adapter.
pub mod analytics;
/// Application configuration.
pub mod config;
/// Image caching and fetching.
pub mod image;

pub use analytics::TracingAnalytics;
pub use config::{AppConfig, CliArgs, Command, ConfigError, ImagesConfig, LogLevel, StorageManager};
pub use self::image::{
    CacheStats, DiskImageCache, HttpImageFetcher, ImageCache, MemoryImageCache, decode_payload,
};
