//! INI configuration file support.
//!
//! The file lives at `~/.doomkit/config.ini`:
//!
//! ```ini
//! [assets]
//! directory = ~/.local/share/doomkit/doom
//!
//! [download]
//! sources = https://a.example/doom.zip, https://b.example/doom1.zip
//! connect_timeout = 30
//! attempt_timeout = 300
//! total_timeout = 600
//! max_archive_size = 64M
//!
//! [server]
//! listen = 127.0.0.1:8188
//!
//! [logging]
//! level = info
//! file = ~/.doomkit/doomkit.log
//! ```
//!
//! Missing keys fall back to built-in defaults; a missing file is not an error.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::defaults::{APP_DIR_NAME, DEFAULT_LISTEN_ADDR, DEFAULT_LOG_LEVEL};
use super::AssetConfig;

const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read or parsed.
    #[error("failed to read config {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The file could not be written.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A key holds a value that cannot be interpreted.
    #[error("invalid value for [{section}] {key}: '{value}'")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `doomkit=debug`.
    pub level: String,
    /// Optional log file; stderr only when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// HTTP boundary settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Socket address to bind.
    pub listen: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8188))),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Acquisition settings.
    pub assets: AssetConfig,
    /// HTTP boundary settings.
    pub server: ServerSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Path of the user config file (`~/.doomkit/config.ini`).
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(format!(".{}", APP_DIR_NAME))
        .join(CONFIG_FILE_NAME)
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigFileError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigFileError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigFileError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// The acquisition settings.
    pub fn to_asset_config(&self) -> AssetConfig {
        self.assets.clone()
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("assets")) {
            if let Some(dir) = section.get("directory") {
                config.assets.target_dir = expand_home(dir.trim());
            }
        }

        if let Some(section) = ini.section(Some("download")) {
            if let Some(sources) = section.get("sources") {
                config.assets.sources = sources
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            if let Some(v) = section.get("connect_timeout") {
                config.assets.connect_timeout = parse_secs("connect_timeout", v)?;
            }
            if let Some(v) = section.get("attempt_timeout") {
                config.assets.attempt_timeout = parse_secs("attempt_timeout", v)?;
            }
            if let Some(v) = section.get("total_timeout") {
                config.assets.total_timeout = parse_secs("total_timeout", v)?;
            }
            if let Some(v) = section.get("max_archive_size") {
                config.assets.max_archive_bytes =
                    parse_size(v).ok_or_else(|| ConfigFileError::InvalidValue {
                        section: "download",
                        key: "max_archive_size",
                        value: v.to_string(),
                    })?;
            }
        }

        if let Some(section) = ini.section(Some("server")) {
            if let Some(v) = section.get("listen") {
                config.server.listen =
                    v.trim()
                        .parse()
                        .map_err(|_| ConfigFileError::InvalidValue {
                            section: "server",
                            key: "listen",
                            value: v.to_string(),
                        })?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(v) = section.get("level") {
                config.logging.level = v.trim().to_string();
            }
            if let Some(v) = section.get("file") {
                let v = v.trim();
                config.logging.file = (!v.is_empty()).then(|| expand_home(v));
            }
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("assets")).set(
            "directory",
            self.assets.target_dir.to_string_lossy().to_string(),
        );

        ini.with_section(Some("download"))
            .set("sources", self.assets.sources.join(", "))
            .set(
                "connect_timeout",
                self.assets.connect_timeout.as_secs().to_string(),
            )
            .set(
                "attempt_timeout",
                self.assets.attempt_timeout.as_secs().to_string(),
            )
            .set(
                "total_timeout",
                self.assets.total_timeout.as_secs().to_string(),
            )
            .set(
                "max_archive_size",
                self.assets.max_archive_bytes.to_string(),
            );

        ini.with_section(Some("server"))
            .set("listen", self.server.listen.to_string());

        let mut logging = ini.with_section(Some("logging"));
        logging.set("level", self.logging.level.clone());
        if let Some(ref file) = self.logging.file {
            logging.set("file", file.to_string_lossy().to_string());
        }

        ini
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigFileError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigFileError::InvalidValue {
            section: "download",
            key,
            value: value.to_string(),
        })
}

/// Parse a byte size with an optional K, M or G suffix (powers of 1024).
fn parse_size(value: &str) -> Option<u64> {
    let value = value.trim().to_uppercase();
    let (digits, multiplier) = match value.chars().last()? {
        'K' => (&value[..value.len() - 1], 1024),
        'M' => (&value[..value.len() - 1], 1024 * 1024),
        'G' => (&value[..value.len() - 1], 1024 * 1024 * 1024),
        _ => (value.as_str(), 1),
    };
    digits.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
