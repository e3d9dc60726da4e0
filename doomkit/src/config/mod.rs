//! Configuration for asset acquisition and serving.
//!
//! Everything here is fixed at startup: sources, timeouts and the target
//! directory are never overridden per request. Values come from, in order of
//! precedence:
//!
//! 1. The INI config file (`~/.doomkit/config.ini`), see [`ConfigFile`]
//! 2. Built-in defaults, see [`defaults`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use doomkit::config::AssetConfig;
//!
//! let config = AssetConfig::new("/tmp/doom".into())
//!     .with_source("https://mirror.example/doom19s.zip")
//!     .with_attempt_timeout(Duration::from_secs(60));
//! ```

pub mod defaults;
mod file;

pub use file::{config_file_path, ConfigFile, ConfigFileError, LoggingSettings, ServerSettings};

use std::path::PathBuf;
use std::time::Duration;

use defaults::{
    default_sources, default_target_dir, DEFAULT_ATTEMPT_TIMEOUT_SECS,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_ARCHIVE_BYTES, DEFAULT_TOTAL_TIMEOUT_SECS,
};

/// Configuration for the acquisition subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory where canonical game files are stored.
    pub target_dir: PathBuf,

    /// Archive URLs, tried in order; first success wins.
    pub sources: Vec<String>,

    /// Connect timeout for each source.
    pub connect_timeout: Duration,

    /// Timeout for one complete download attempt.
    pub attempt_timeout: Duration,

    /// Bound on the whole fetch phase across all sources.
    pub total_timeout: Duration,

    /// Largest archive body accepted from a source.
    pub max_archive_bytes: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            sources: default_sources(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            total_timeout: Duration::from_secs(DEFAULT_TOTAL_TIMEOUT_SECS),
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
        }
    }
}

impl AssetConfig {
    /// Create a configuration with the given target directory and default sources.
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            ..Default::default()
        }
    }

    /// Set the target directory.
    pub fn with_target_dir(mut self, path: PathBuf) -> Self {
        self.target_dir = path;
        self
    }

    /// Replace the source list.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Append a source to the end of the list.
    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.sources.push(url.into());
        self
    }

    /// Set the per-source connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Set the total fetch timeout.
    pub fn with_total_timeout(mut self, timeout: Duration) -> Self {
        self.total_timeout = timeout;
        self
    }

    /// Set the maximum accepted archive size.
    pub fn with_max_archive_bytes(mut self, bytes: u64) -> Self {
        self.max_archive_bytes = bytes;
        self
    }
}
