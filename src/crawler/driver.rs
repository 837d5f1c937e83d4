//! Crawl driver - the resumable traversal loop
//!
//! The driver owns the cursor and walks the archive's next-link chain one
//! page at a time: fetch the page, attempt the image download, resolve the
//! next link, then advance the cursor and persist it. The checkpoint save
//! sits strictly after the page's download attempt and strictly before the
//! next fetch, which is what bounds reprocessing after a crash to at most
//! one page.

use crate::checkpoint::{CheckpointStore, FRESH_START};
use crate::config::Config;
use crate::crawler::downloader::{download_image, DownloadOutcome};
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_page;
use crate::{ConfigError, CrawlError, Result};
use reqwest::Client;
use scraper::Selector;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// End-of-run totals, reported in the logs and returned for tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub pages_visited: u64,
    pub images_saved: u64,
    pub images_failed: u64,
}

/// The crawl driver
///
/// Generic over the checkpoint backend so tests can run against an
/// in-memory store; production code uses [`crate::FileCheckpoint`].
pub struct Driver<S: CheckpointStore> {
    client: Client,
    store: S,
    base_url: String,
    image_selector: Selector,
    next_selector: Selector,
    output_dir: PathBuf,
    politeness_delay: Duration,
    max_filename_length: usize,
}

impl<S: CheckpointStore> Driver<S> {
    /// Creates a driver from a validated configuration
    pub fn new(config: &Config, client: Client, store: S) -> Result<Self> {
        let image_selector = parse_selector("image_selector", &config.archive.image_selector)?;
        let next_selector = parse_selector("next_selector", &config.archive.next_selector)?;

        Ok(Self {
            client,
            store,
            base_url: config.archive.base_url.clone(),
            image_selector,
            next_selector,
            output_dir: PathBuf::from(&config.downloader.output_dir),
            politeness_delay: Duration::from_millis(config.downloader.politeness_delay_ms),
            max_filename_length: config.downloader.max_filename_length,
        })
    }

    /// Runs the traversal to the end of the archive
    ///
    /// Starts from the persisted cursor (or from page 1 when `fresh`),
    /// visits each page once, and returns the run totals after the last
    /// page. A page-fetch or checkpoint failure aborts the run with `Err`;
    /// the last persisted cursor is then the resume point for the next run.
    pub async fn run(&mut self, fresh: bool) -> Result<RunSummary> {
        let mut cursor = if fresh { FRESH_START } else { self.store.load()? };
        let mut current_url = self.first_page_url(cursor)?;

        let mut summary = RunSummary::default();
        let start_time = std::time::Instant::now();
        tracing::info!("Starting crawl at page {}", cursor);

        loop {
            tracing::info!("Scraping page {}: {}", cursor, current_url);
            let html = fetch_page(&self.client, current_url.as_str()).await?;
            summary.pages_visited += 1;

            // One parse per page yields both the image and the next-link.
            let page = parse_page(&html, &current_url, &self.image_selector, &self.next_selector);

            match page.comic {
                Some(entry) => {
                    let outcome = download_image(
                        &self.client,
                        &entry,
                        &self.output_dir,
                        cursor,
                        self.max_filename_length,
                    )
                    .await;
                    match outcome {
                        DownloadOutcome::Saved(_) => summary.images_saved += 1,
                        DownloadOutcome::Failed => summary.images_failed += 1,
                    }
                }
                None => {
                    tracing::debug!("No comic image on page {}", cursor);
                }
            }

            match page.next_url {
                Some(next_url) => {
                    current_url = next_url;
                    cursor += 1;
                    // Persisting here, after this page's download attempt and
                    // before the next fetch, is the resumability invariant.
                    self.store.save(cursor)?;
                    tokio::time::sleep(self.politeness_delay).await;
                }
                None => {
                    tracing::info!("No more pages to scrape");
                    break;
                }
            }
        }

        tracing::info!(
            "Crawl completed: {} pages visited, {} images saved, {} failed in {:?}",
            summary.pages_visited,
            summary.images_saved,
            summary.images_failed,
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Builds the address of the first page of a run
    ///
    /// This appends the cursor to the configured base URL. The rule only
    /// applies to the first page - every later address comes from a resolved
    /// next-link - and it is a site-specific convention worth confirming
    /// before pointing the crawler at a new archive.
    fn first_page_url(&self, cursor: u64) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, cursor)).map_err(CrawlError::UrlParse)
    }
}

fn parse_selector(name: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        CrawlError::Config(ConfigError::InvalidSelector(format!(
            "{} '{}' is not a valid selector: {:?}",
            name, selector, e
        )))
    })
}
