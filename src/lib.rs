//! Comic-Mirror: a resumable webcomic archive downloader
//!
//! This crate crawls a paginated comic archive page by page, saving one image
//! per page and persisting a download cursor so an interrupted run resumes
//! from the last page it finished instead of starting over.

pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod naming;

use thiserror::Error;

/// Main error type for Comic-Mirror operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch page {url}: {source}")]
    PageFetch { url: String, source: reqwest::Error },

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Errors while reading or writing the download cursor
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to access checkpoint file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Checkpoint file {path} holds non-numeric content: {content:?}")]
    Corrupt { path: String, content: String },
}

/// Result type alias for Comic-Mirror operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checkpoint::{CheckpointStore, FileCheckpoint};
pub use config::Config;
pub use crawler::{crawl, Driver};
