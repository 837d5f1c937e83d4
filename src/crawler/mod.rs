//! Crawler module for page fetching, extraction, and downloading
//!
//! This module contains the core crawling logic, including:
//! - HTTP client construction and page fetching
//! - Single-pass comic image and next-link extraction from markup
//! - Best-effort image downloading
//! - The resumable traversal loop

mod downloader;
mod driver;
mod fetcher;
mod parser;

pub use downloader::{download_image, DownloadOutcome};
pub use driver::{Driver, RunSummary};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{parse_page, ComicEntry, ParsedPage};

use crate::checkpoint::FileCheckpoint;
use crate::config::Config;
use crate::Result;

/// Runs a complete crawl of the archive
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Open the file-backed checkpoint store
/// 3. Walk the archive from the persisted cursor (or page 1 when `fresh`)
/// 4. Log end-of-run totals
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `fresh` - Ignore any existing checkpoint and start at page 1
///
/// # Returns
///
/// * `Ok(RunSummary)` - Crawl reached the end of the archive
/// * `Err(CrawlError)` - A page fetch or checkpoint write failed
pub async fn crawl(config: Config, fresh: bool) -> Result<RunSummary> {
    let client = build_http_client(&config.user_agent, &config.downloader)?;
    let store = FileCheckpoint::new(&config.downloader.checkpoint_path);

    let mut driver = Driver::new(&config, client, store)?;
    driver.run(fresh).await
}
