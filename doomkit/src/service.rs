//! Asset service: the three boundary operations bound to one configuration.
//!
//! `AssetService` owns the target directory, the acquirer, the status
//! reporter and the file server. Hosts (the CLI, the HTTP router) talk only to
//! this type.
//!
//! # Example
//!
//! ```ignore
//! use doomkit::config::AssetConfig;
//! use doomkit::service::AssetService;
//!
//! let service = AssetService::from_config(AssetConfig::default())?;
//!
//! if !service.status().is_playable() {
//!     let result = service.download().await;
//!     println!("{:?}", result.files);
//! }
//!
//! let served = service.open_file("DOOM1.WAD").await?;
//! ```

use crate::acquire::{Acquirer, AcquisitionResult};
use crate::archive::ArchiveInspector;
use crate::config::AssetConfig;
use crate::directory::TargetDirectory;
use crate::error::{FetchError, ServeResult};
use crate::fetch::{HttpClient, ReqwestClient};
use crate::serve::{SecureFileServer, ServedFile};
use crate::status::{StatusReport, StatusReporter};

/// Façade over acquisition, status and serving for one target directory.
pub struct AssetService<C: HttpClient = ReqwestClient> {
    config: AssetConfig,
    target: TargetDirectory,
    acquirer: Acquirer<C>,
    reporter: StatusReporter,
    server: SecureFileServer,
}

impl AssetService<ReqwestClient> {
    /// Build a service backed by the real HTTP client.
    pub fn from_config(config: AssetConfig) -> Result<Self, FetchError> {
        let client = ReqwestClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> AssetService<C> {
    /// Build a service over an arbitrary transport.
    pub fn with_client(config: AssetConfig, client: C) -> Self {
        let target = TargetDirectory::new(config.target_dir.clone());
        let inspector = ArchiveInspector::new().with_max_entry_bytes(config.max_archive_bytes);
        let acquirer = Acquirer::new(client, config.total_timeout).with_inspector(inspector);
        Self {
            config,
            target,
            acquirer,
            reporter: StatusReporter::new(),
            server: SecureFileServer::new(),
        }
    }

    /// The configuration this service was built from.
    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// The managed directory.
    pub fn target(&self) -> &TargetDirectory {
        &self.target
    }

    /// Report which canonical files are present.
    pub fn status(&self) -> StatusReport {
        self.reporter.status(&self.target)
    }

    /// Run one acquisition against the configured sources.
    pub async fn download(&self) -> AcquisitionResult {
        self.acquirer.run(&self.config.sources, &self.target).await
    }

    /// Open one file for serving.
    pub async fn open_file(&self, name: &str) -> ServeResult<ServedFile> {
        self.server.serve(name, &self.target).await
    }
}
