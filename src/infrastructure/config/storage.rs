//! Reading and writing `config.toml`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory for this platform")]
    ConfigDirNotFound,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Owns the configuration directory and the `config.toml` inside it.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform configuration directory.
    ///
    /// # Errors
    /// Returns [`ConfigError::ConfigDirNotFound`] if the platform has none.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Path of the config file, honouring an explicit override.
    #[must_use]
    pub fn config_path(&self, path_override: Option<&Path>) -> PathBuf {
        path_override.map_or_else(|| self.config_dir.join(CONFIG_FILE_NAME), Path::to_path_buf)
    }

    /// Loads the configuration.
    ///
    /// A missing file is created with defaults. A file that does not parse is
    /// left as is and defaults are used. Out-of-range image settings are
    /// clamped.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.config_path(path_override);

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Unreadable config, using defaults");
                AppConfig::default()
            })
        } else {
            info!(path = %path.display(), "No config file, writing defaults");
            let config = AppConfig::default();
            write_atomic(&path, &config)?;
            config
        };

        config.clamp_limits();
        debug!(path = %path.display(), ?config.images, "Configuration loaded");
        Ok(config)
    }
}

/// Writes through a temporary file in the same directory, then renames.
fn write_atomic(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("config path has no parent"))?;
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.images.memory_cache_size, 50);
        let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("[images]"));
    }

    #[test]
    fn test_malformed_file_is_kept() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "images = [").unwrap();

        let config = manager.load_config(None).unwrap();

        assert!(!config.user_tracking_enabled);
        assert_eq!(fs::read_to_string(&path).unwrap(), "images = [");
    }

    #[test]
    fn test_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "user_tracking_enabled = true\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert!(config.user_tracking_enabled);
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_zero_limits_are_clamped() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[images]\nmemory_cache_size = 0\nmax_concurrent_fetches = 0\n",
        )
        .unwrap();

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.images.memory_cache_size, 1);
        assert_eq!(config.images.max_concurrent_fetches, 1);
    }

    #[test]
    fn test_defaults_written_into_missing_directory() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("nested"));

        let first = manager.load_config(None).unwrap();
        let reloaded = manager.load_config(None).unwrap();

        assert!(manager.config_path(None).is_file());
        assert_eq!(first.images, reloaded.images);
        let leftovers = fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
