//! Comic-Mirror main entry point
//!
//! This is the command-line interface for the Comic-Mirror archive downloader.

use clap::Parser;
use comic_mirror::config::load_config_with_hash;
use comic_mirror::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Comic-Mirror: a resumable webcomic archive downloader
///
/// Comic-Mirror walks a paginated comic archive one page at a time, saving
/// each page's image and checkpointing its position so an interrupted run
/// picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "comic-mirror")]
#[command(version = "1.0.0")]
#[command(about = "A resumable webcomic archive downloader", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Ignore any existing checkpoint and start from page 1
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.fresh).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("comic_mirror=info,warn"),
            1 => EnvFilter::new("comic_mirror=debug,info"),
            2 => EnvFilter::new("comic_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &comic_mirror::Config) {
    println!("=== Comic-Mirror Dry Run ===\n");

    println!("Archive:");
    println!("  Base URL: {}", config.archive.base_url);
    println!("  Image selector: {}", config.archive.image_selector);
    println!("  Next-link selector: {}", config.archive.next_selector);

    println!("\nDownloader:");
    println!("  Output directory: {}", config.downloader.output_dir);
    println!("  Checkpoint file: {}", config.downloader.checkpoint_path);
    println!(
        "  Politeness delay: {}ms",
        config.downloader.politeness_delay_ms
    );
    println!(
        "  Request timeout: {}s (connect {}s)",
        config.downloader.request_timeout_secs, config.downloader.connect_timeout_secs
    );
    println!(
        "  Max file name length: {}",
        config.downloader.max_filename_length
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling at {}<cursor> and follow next-links",
        config.archive.base_url
    );
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: comic_mirror::Config,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous checkpoint)");
    } else {
        tracing::info!("Starting crawl (will resume from checkpoint if one exists)");
    }

    match crawl(config, fresh).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} pages, {} images saved, {} failed",
                summary.pages_visited,
                summary.images_saved,
                summary.images_failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
