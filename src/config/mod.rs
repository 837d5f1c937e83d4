//! Configuration loading, parsing, and validation
//!
//! Configuration lives in a TOML file with three sections:
//! - `[archive]` - where the comic lives and how to find its markup elements
//! - `[downloader]` - output paths, pacing, and HTTP timeouts
//! - `[user-agent]` - how the crawler identifies itself to the remote server

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{ArchiveConfig, Config, DownloaderConfig, UserAgentConfig};
pub use validation::validate;
