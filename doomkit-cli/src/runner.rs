//! Shared setup for commands: config loading and logging.

use std::path::{Path, PathBuf};

use doomkit::config::{config_file_path, ConfigFile};
use doomkit::logging::{self, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _log_guard: LoggingGuard,
}

impl CliRunner {
    /// Load the config file and install logging.
    ///
    /// `--verbose` raises the level to `debug` regardless of the file.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let mut logging = config.logging.clone();
        if verbose {
            logging.level = "info,doomkit=debug".to_string();
        }
        let log_guard = logging::init(&logging);

        Ok(Self {
            config,
            config_path,
            _log_guard: log_guard,
        })
    }

    /// The loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Path the configuration was loaded from.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Log the startup banner for a command.
    pub fn log_startup(&self, command: &str) {
        info!(
            version = doomkit::VERSION,
            command,
            config = %self.config_path.display(),
            dir = %self.config.assets.target_dir.display(),
            "doomkit starting"
        );
    }
}
