use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use beerdrinkin::infrastructure::image::DiskImageCache;
use beerdrinkin::infrastructure::{
    AppConfig, CliArgs, Command, HttpImageFetcher, ImageCache, StorageManager, TracingAnalytics,
};
use beerdrinkin::presentation::grid::{CellState, GridImageProvider, PhotoGrid};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    config.clamp_limits();
    Ok(config)
}

async fn open_cache(config: &AppConfig) -> Result<Arc<ImageCache>> {
    let capacity = config.images.memory_cache_size;
    let cache = match &config.images.cache_dir {
        Some(dir) => {
            let disk = DiskImageCache::new(dir.clone())
                .await
                .wrap_err_with(|| format!("opening image cache at {}", dir.display()))?;
            ImageCache::new(capacity, Arc::new(disk))
        }
        None => ImageCache::open_default(capacity)
            .await
            .wrap_err("opening default image cache")?,
    };
    Ok(Arc::new(cache))
}

async fn run_grid(config: &AppConfig, cache: Arc<ImageCache>, locators: &[String]) -> Result<()> {
    let fetcher = Arc::new(HttpImageFetcher::new(config.images.timeout())?);
    let analytics = Arc::new(TracingAnalytics::new(config.user_tracking_enabled));

    let (tx, rx) = mpsc::unbounded_channel();
    let provider = GridImageProvider::new(
        cache.clone(),
        fetcher,
        config.images.max_concurrent_fetches,
        &tx,
    )
    .with_analytics(analytics);
    let mut grid = PhotoGrid::new(Arc::new(provider), rx);

    grid.refresh(locators).await;
    grid.settle().await;

    for (locator, cell) in locators.iter().zip(grid.cells()) {
        match cell {
            CellState::Image(image) => {
                println!("{:>5}x{:<5} {locator}", image.width(), image.height());
            }
            CellState::Placeholder => println!("{:^11} {locator}", "missing"),
            CellState::Loading => println!("{:^11} {locator}", "pending"),
        }
    }
    println!("memory: {}", cache.stats());
    println!("disk entries: {}", cache.disk_len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = beerdrinkin::VERSION, "Starting {}", beerdrinkin::NAME);

    let cache = open_cache(&config).await?;
    match &args.command {
        Command::Grid { locators } => run_grid(&config, cache, locators).await,
        Command::ClearCache => {
            cache.clear().await;
            println!("image cache cleared");
            Ok(())
        }
    }
}
