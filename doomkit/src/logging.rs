//! Tracing subscriber setup.
//!
//! Installs a registry with:
//! - an `EnvFilter` built from the configured level (`RUST_LOG` wins when set)
//! - a stderr layer with local RFC 3339 timestamps
//! - an optional non-blocking file layer
//!
//! Keep the returned [`LoggingGuard`] alive for the life of the process; the
//! file writer flushes when it is dropped.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;

/// Keeps background log writers alive.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter from the configured level, letting `RUST_LOG` override it.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless: later calls leave the existing
/// subscriber in place and return an empty guard.
pub fn init(settings: &LoggingSettings) -> LoggingGuard {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false);

    let (file_layer, file_guard) = match settings.file.as_deref().and_then(file_writer) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(&settings.level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        if let Some(path) = &settings.file {
            tracing::debug!(file = %path.display(), "File logging enabled");
        }
        LoggingGuard { _file: file_guard }
    } else {
        LoggingGuard { _file: None }
    }
}

/// Split a log path into directory and file name.
///
/// A bare file name lives in the current directory.
fn log_file_location(path: &Path) -> Option<(&Path, &OsStr)> {
    let name = path.file_name()?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some((dir, name))
}

fn file_writer(path: &Path) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let Some((dir, name)) = log_file_location(path) else {
        eprintln!("Log file path {} has no file name; file logging disabled", path.display());
        return None;
    };
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Cannot create log directory {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, name);
    Some(tracing_appender::non_blocking(appender))
}
