//! Error types for asset acquisition and serving.
//!
//! Each boundary has its own error enum:
//! - [`DirectoryError`] - the target directory cannot be created or used
//! - [`FetchError`] - a single download attempt failed (never escapes the fetcher alone)
//! - [`AcquireError`] - a whole acquisition failed
//! - [`ServeError`] - a file request was rejected

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type for acquisition operations.
pub type AcquireResult<T> = Result<T, AcquireError>;

/// Result type for file serving operations.
pub type ServeResult<T> = Result<T, ServeError>;

/// The target directory is unusable.
#[derive(Debug, Error)]
#[error("target directory {} is unusable: {source}", path.display())]
pub struct DirectoryError {
    /// Directory that could not be created or resolved.
    pub path: PathBuf,
    /// Underlying filesystem error.
    #[source]
    pub source: io::Error,
}

impl DirectoryError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// A single download attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS or body transfer failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The attempt exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The response body exceeded the configured maximum.
    #[error("response exceeds {limit} bytes")]
    TooLarge { limit: u64 },
}

/// A failed attempt against one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// The URL that was tried.
    pub url: String,
    /// Why the attempt failed.
    pub error: FetchError,
}

/// Errors that end an acquisition.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The target directory could not be prepared.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Every configured source failed.
    #[error("All download sources failed. Please use manual download.")]
    AllSourcesExhausted {
        /// Number of sources that were tried.
        attempted: usize,
        /// Per-source failure details, in the order tried.
        failures: Vec<SourceFailure>,
    },

    /// The archive was fetched but contained none of the expected files.
    #[error(
        "Could not find DOOM.EXE or DOOM1.WAD in archive. Found files: {}",
        sample.join(", ")
    )]
    NoRecognizedFiles {
        /// Bounded sample of entry names seen in the archive.
        sample: Vec<String>,
    },

    /// The payload could not be opened as an archive.
    #[error("downloaded payload is not a valid archive: {0}")]
    InvalidArchive(String),

    /// The fetch phase did not finish within the total timeout.
    #[error("download timed out after {after:?}")]
    TimedOut { after: Duration },

    /// A background task failed to complete.
    #[error("acquisition task failed: {0}")]
    Task(String),
}

/// Reasons a file request is rejected.
///
/// `Forbidden` deliberately covers both path traversal and disallowed
/// extensions so callers cannot tell them apart.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The name escapes the directory or has a disallowed extension.
    #[error("Only DOOM game files are allowed")]
    Forbidden,

    /// No such file in the directory.
    #[error("File not found")]
    NotFound,

    /// The file exists but could not be opened.
    #[error("failed to open file: {0}")]
    Io(#[from] io::Error),
}
