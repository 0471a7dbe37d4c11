//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use super::args::CliArgs;

const APP_NAME: &str = "beerdrinkin";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "beerdrinkin";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Send usage events to the analytics collaborator.
    #[serde(default)]
    pub user_tracking_enabled: bool,

    /// Image provisioning configuration.
    #[serde(default)]
    pub images: ImagesConfig,
}

/// Image provisioning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Maximum decoded images held in memory.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,

    /// Maximum concurrent downloads.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Disk tier directory. Defaults to the platform cache directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: default_memory_cache_size(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            timeout_secs: default_timeout_secs(),
            cache_dir: None,
        }
    }
}

impl ImagesConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

const fn default_memory_cache_size() -> usize {
    50
}

const fn default_max_concurrent_fetches() -> usize {
    4
}

const fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(tracking) = args.user_tracking {
            self.user_tracking_enabled = tracking;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.images.cache_dir = Some(cache_dir.clone());
        }
        if let Some(size) = args.memory_cache_size {
            self.images.memory_cache_size = size;
        }
        if let Some(max) = args.max_concurrent_fetches {
            self.images.max_concurrent_fetches = max;
        }
        if let Some(timeout) = args.timeout_secs {
            self.images.timeout_secs = timeout;
        }
    }

    /// Raises zero image limits to 1.
    pub fn clamp_limits(&mut self) {
        let images = &mut self.images;
        if images.memory_cache_size == 0 {
            warn!("images.memory_cache_size must be at least 1");
            images.memory_cache_size = 1;
        }
        if images.max_concurrent_fetches == 0 {
            warn!("images.max_concurrent_fetches must be at least 1");
            images.max_concurrent_fetches = 1;
        }
        if images.timeout_secs == 0 {
            warn!("images.timeout_secs must be at least 1");
            images.timeout_secs = 1;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("beerdrinkin.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            user_tracking_enabled: false,
            images: ImagesConfig::default(),
        }
    }
}
