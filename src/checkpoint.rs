//! Download cursor persistence
//!
//! The checkpoint is the crawl's only durable state: a single text file
//! holding the decimal page number the next run should start from. It is
//! read once at startup and overwritten after every successfully processed
//! page, so a crash re-attempts at most one page and never skips one.

use crate::CheckpointError;
use std::path::{Path, PathBuf};

/// Cursor value used when no checkpoint exists yet
pub const FRESH_START: u64 = 1;

/// Trait for checkpoint backends
///
/// The driver only ever talks to this trait, so tests can substitute an
/// in-memory store for the real file.
pub trait CheckpointStore {
    /// Reads the persisted cursor
    ///
    /// Absence of persisted state is a normal fresh-start condition and
    /// returns [`FRESH_START`], not an error. Unreadable or non-numeric
    /// content does error: silently restarting from page 1 would re-scrape
    /// the whole archive.
    fn load(&self) -> Result<u64, CheckpointError>;

    /// Durably overwrites the persisted cursor
    fn save(&self, cursor: u64) -> Result<(), CheckpointError>;
}

/// File-backed checkpoint store
///
/// The on-disk format is the bare decimal string of the cursor. Saves go
/// through a sibling temp file and a rename, so a crash mid-write cannot
/// leave a torn value behind.
#[derive(Debug, Clone)]
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> CheckpointError {
        CheckpointError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CheckpointStore for FileCheckpoint {
    fn load(&self) -> Result<u64, CheckpointError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FRESH_START),
            Err(e) => return Err(self.io_err(e)),
        };

        content
            .trim()
            .parse::<u64>()
            .map_err(|_| CheckpointError::Corrupt {
                path: self.path.display().to_string(),
                content: content.trim().to_string(),
            })
    }

    fn save(&self, cursor: u64) -> Result<(), CheckpointError> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, cursor.to_string()).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}
