use serde::Deserialize;

/// Main configuration structure for Comic-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub downloader: DownloaderConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Archive location and markup shape configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Base address of the archive. The first page of a run is addressed by
    /// appending the cursor value to this string; every later page comes from
    /// the previous page's next-link. Confirm this rule against the actual
    /// site before pointing the crawler at it.
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// CSS selector matching the comic image element
    #[serde(rename = "image-selector", default = "default_image_selector")]
    pub image_selector: String,

    /// CSS selector matching the next-page navigation link
    #[serde(rename = "next-selector", default = "default_next_selector")]
    pub next_selector: String,
}

/// Download pacing, paths, and HTTP timeout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    /// Directory receiving one file per downloaded page image
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Path of the text file holding the download cursor
    #[serde(rename = "checkpoint-path")]
    pub checkpoint_path: String,

    /// Pause after each advanced page before the next fetch (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Overall per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on generated file name length, prefix and extension included
    #[serde(rename = "max-filename-length")]
    pub max_filename_length: usize,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            output_dir: "./comics".to_string(),
            checkpoint_path: "./last_page.txt".to_string(),
            politeness_delay_ms: 100,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_filename_length: 255,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

fn default_image_selector() -> String {
    "img#comicimage".to_string()
}

fn default_next_selector() -> String {
    "a[rel='next'].comicnavlink".to_string()
}
