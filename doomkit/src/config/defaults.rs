//! Built-in default values.

use std::path::PathBuf;

/// Shareware archive mirrors, in priority order.
///
/// Each archive is known to contain both `DOOM.EXE` and `DOOM1.WAD`.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://archive.org/download/DoomsharewareEpisode/DoomV1.1sw1993idSoftwareInc.action.zip",
    "https://distro.ibiblio.org/slitaz/sources/packages/d/doom1.zip",
    "https://ia802909.us.archive.org/8/items/doom-1.9-shareware/doom19s.zip",
];

/// File extensions (uppercase, without dot) that may be served.
pub const ALLOWED_EXTENSIONS: &[&str] = &["WAD", "EXE", "BAT", "COM"];

/// Connect timeout for a single source in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Timeout for one complete download attempt in seconds.
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Upper bound on the whole fetch phase in seconds.
pub const DEFAULT_TOTAL_TIMEOUT_SECS: u64 = 600;

/// Largest archive accepted from a source (64 MB).
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 64 * 1024 * 1024;

/// Address the HTTP boundary listens on.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8188";

/// Default log filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application directory name used under platform directories.
pub const APP_DIR_NAME: &str = "doomkit";

/// Directory holding the acquired game files.
///
/// Resolves to `<data dir>/doomkit/doom`, falling back to the system temp
/// directory when the platform has no data directory.
pub fn default_target_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("doom")
}

/// Owned copy of [`DEFAULT_SOURCES`].
pub fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
}
