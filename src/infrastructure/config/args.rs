use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "beerdrinkin",
    version,
    about = "BeerDrinkin photo grid and image cache tools",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "BEERDRINKIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable usage tracking.
    #[arg(long)]
    pub user_tracking: Option<bool>,

    /// Image cache directory.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Number of decoded images kept in memory.
    #[arg(long)]
    pub memory_cache_size: Option<usize>,

    /// Maximum concurrent image downloads.
    #[arg(long)]
    pub max_concurrent_fetches: Option<usize>,

    /// Image request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Loads a photo grid and reports where every image came from.
    Grid {
        /// Image locators, one per grid cell.
        #[arg(required = true)]
        locators: Vec<String>,
    },
    /// Removes every cached image.
    ClearCache,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid_command() {
        let args = CliArgs::try_parse_from([
            "beerdrinkin",
            "--log-level",
            "debug",
            "--max-concurrent-fetches",
            "2",
            "grid",
            "https://a/1",
            "https://a/2",
        ])
        .unwrap();

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.max_concurrent_fetches, Some(2));
        assert_eq!(
            args.command,
            Command::Grid {
                locators: vec!["https://a/1".into(), "https://a/2".into()]
            }
        );
    }

    #[test]
    fn test_grid_requires_locators() {
        assert!(CliArgs::try_parse_from(["beerdrinkin", "grid"]).is_err());
    }
}
