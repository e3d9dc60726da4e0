//! doomkit - DOOM shareware acquisition and serving
//!
//! This library fetches the DOOM shareware archive from a list of mirrors,
//! extracts the game files under canonical names into a managed directory,
//! and serves them back to a browser-hosted DOS emulator.
//!
//! # Architecture
//!
//! ```text
//! AssetService ──┬── Acquirer ──┬── MultiSourceFetcher ── HttpClient
//!                │              └── ArchiveInspector (rules)
//!                ├── StatusReporter
//!                └── SecureFileServer
//!                        │
//!                 TargetDirectory
//! ```
//!
//! The [`server`] module puts the service behind three HTTP routes.

pub mod acquire;
pub mod archive;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod serve;
pub mod server;
pub mod service;
pub mod status;

#[cfg(test)]
mod test_support;

pub use acquire::{Acquirer, Acquisition, AcquisitionResult};
pub use archive::CanonicalRole;
pub use config::AssetConfig;
pub use directory::TargetDirectory;
pub use error::{AcquireError, DirectoryError, FetchError, ServeError};
pub use serve::{SecureFileServer, ServedFile};
pub use server::AssetServer;
pub use service::AssetService;
pub use status::{StatusReport, StatusReporter};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
