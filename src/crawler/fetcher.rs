//! HTTP fetcher implementation
//!
//! This module builds the single HTTP client the crawler uses and fetches
//! archive page markup. Page fetches carry the crawl's strictest failure
//! policy: any network or HTTP error here aborts the whole run, leaving the
//! last persisted cursor as the resume point. (Image fetches, which are
//! allowed to fail, live in the downloader module.)

use crate::config::{DownloaderConfig, UserAgentConfig};
use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for both page and image requests
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `downloader` - Timeout configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use comic_mirror::config::{DownloaderConfig, UserAgentConfig};
/// use comic_mirror::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "ComicMirror".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &DownloaderConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    downloader: &DownloaderConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(downloader.request_timeout_secs))
        .connect_timeout(Duration::from_secs(downloader.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one archive page and returns its markup
///
/// Sends a plain GET request and reads the body as text. Any failure -
/// connection error, timeout, or a non-success status code - is returned as
/// [`CrawlError::PageFetch`], which the driver treats as fatal for the run.
/// There is no per-page retry.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    let fetch_err = |source: reqwest::Error| CrawlError::PageFetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_err)?;
    let response = response.error_for_status().map_err(fetch_err)?;
    response.text().await.map_err(fetch_err)
}
