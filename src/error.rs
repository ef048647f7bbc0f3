//! Error types for listing operations.
//!
//! Only structural failures surface here. Problems with a single entry are
//! skipped by the scanner and never reach the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Error)]
pub enum ListError {
    /// The listed path itself could not be stat'ed.
    #[error("cannot access '{}': {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The listed directory could not be opened for reading.
    #[error("cannot open directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("write error: {0}")]
    Io(#[from] io::Error),
}
