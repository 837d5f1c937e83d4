//! Image download and file persistence
//!
//! The download step is deliberately best-effort: a page whose image cannot
//! be fetched or written is logged and left behind, and the crawl moves on.
//! Failures here never block checkpoint advancement, so a bad image on one
//! page cannot stall the rest of the archive.

use crate::crawler::parser::ComicEntry;
use crate::naming::{image_extension, image_file_name};
use reqwest::Client;
use std::path::Path;

/// Outcome of one page's download attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Image bytes were written under the given file name
    Saved(String),

    /// Fetch or write failed; details were logged
    Failed,
}

/// Downloads one page's image into the output directory
///
/// Ensures the output directory exists, builds the deterministic file name
/// from the cursor and caption, fetches the image bytes, and writes them,
/// overwriting any file of the same name from an earlier attempt.
///
/// Every failure path logs the image address and error detail and returns
/// [`DownloadOutcome::Failed`] instead of an `Err` - this step never aborts
/// the crawl.
pub async fn download_image(
    client: &Client,
    entry: &ComicEntry,
    output_dir: &Path,
    cursor: u64,
    max_filename_length: usize,
) -> DownloadOutcome {
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        tracing::error!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        );
        return DownloadOutcome::Failed;
    }

    let extension = image_extension(&entry.image_url);
    let file_name = image_file_name(cursor, &entry.caption, &extension, max_filename_length);

    let bytes = match fetch_bytes(client, entry.image_url.as_str()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to fetch image {}: {}", entry.image_url, e);
            return DownloadOutcome::Failed;
        }
    };

    let target = output_dir.join(&file_name);
    if let Err(e) = std::fs::write(&target, &bytes) {
        tracing::error!("Failed to write {}: {}", target.display(), e);
        return DownloadOutcome::Failed;
    }

    tracing::info!("Downloaded {}", file_name);
    DownloadOutcome::Saved(file_name)
}

/// Fetches raw image bytes, treating non-success statuses as errors
async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?;
    let response = response.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
