//! Acquisition orchestration: ensure → fetch → extract → report.
//!
//! ```text
//! Acquirer::acquire
//!     │
//!     ├── 1. TargetDirectory::ensure
//!     ├── 2. MultiSourceFetcher::fetch    (bounded by total timeout)
//!     ├── 3. ArchiveInspector::extract    (blocking pool)
//!     └── 4. Acquisition / AcquisitionResult
//! ```
//!
//! Files are only written once a complete payload is in memory, so a fetch
//! that fails or times out leaves the directory untouched.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::archive::{ArchiveInspector, ExtractionReport};
use crate::directory::TargetDirectory;
use crate::error::{AcquireError, AcquireResult};
use crate::fetch::{FetchedArchive, HttpClient, MultiSourceFetcher, ReqwestClient};

/// A successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    /// The source the archive came from.
    pub source: String,
    /// What the extraction pass produced.
    pub report: ExtractionReport,
}

/// Structured outcome handed to callers of the download operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcquisitionResult {
    /// Whether at least one canonical file was produced.
    pub success: bool,
    /// Canonical filenames produced.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Human-readable summary on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AcquisitionResult {
    /// A successful result listing produced files.
    pub fn success(files: Vec<String>) -> Self {
        let message = format!("Successfully downloaded: {}", files.join(", "));
        Self {
            success: true,
            files,
            message: Some(message),
            error: None,
        }
    }

    /// A failed result.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            files: Vec::new(),
            message: None,
            error: Some(error.into()),
        }
    }
}

impl From<&AcquireResult<Acquisition>> for AcquisitionResult {
    fn from(result: &AcquireResult<Acquisition>) -> Self {
        match result {
            Ok(acquisition) => Self::success(acquisition.report.files()),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Composes fetching and extraction into one acquisition.
///
/// Calls on the same `Acquirer` are serialized: a second `acquire` waits for
/// the first to finish, so two triggers never interleave their writes.
pub struct Acquirer<C: HttpClient = ReqwestClient> {
    fetcher: MultiSourceFetcher<C>,
    inspector: ArchiveInspector,
    total_timeout: Duration,
    in_flight: Mutex<()>,
}

impl<C: HttpClient> Acquirer<C> {
    /// Create an acquirer over the given transport.
    ///
    /// `total_timeout` bounds the whole fetch phase across all sources.
    pub fn new(client: C, total_timeout: Duration) -> Self {
        Self {
            fetcher: MultiSourceFetcher::new(client),
            inspector: ArchiveInspector::new(),
            total_timeout,
            in_flight: Mutex::new(()),
        }
    }

    /// Replace the archive inspector.
    pub fn with_inspector(mut self, inspector: ArchiveInspector) -> Self {
        self.inspector = inspector;
        self
    }

    /// The fetcher used for downloads.
    pub fn fetcher(&self) -> &MultiSourceFetcher<C> {
        &self.fetcher
    }

    /// Run one acquisition.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::Directory`] if the target cannot be created
    /// - [`AcquireError::AllSourcesExhausted`] if no source delivered
    /// - [`AcquireError::TimedOut`] if the fetch phase exceeded the total timeout
    /// - [`AcquireError::InvalidArchive`] / [`AcquireError::NoRecognizedFiles`] from extraction
    pub async fn acquire(
        &self,
        sources: &[String],
        target: &TargetDirectory,
    ) -> AcquireResult<Acquisition> {
        let _guard = self.in_flight.lock().await;

        let dir = target.ensure()?;
        info!(dir = %dir.display(), sources = sources.len(), "Starting acquisition");

        let FetchedArchive { url, bytes } =
            match tokio::time::timeout(self.total_timeout, self.fetcher.fetch(sources)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(AcquireError::TimedOut {
                        after: self.total_timeout,
                    })
                }
            };

        let inspector = self.inspector;
        let target = target.clone();
        let report = tokio::task::spawn_blocking(move || inspector.extract(&bytes, &target))
            .await
            .map_err(|e| AcquireError::Task(e.to_string()))??;

        info!(
            source = %url,
            files = ?report.files(),
            failed_entries = report.failed_entries,
            "Acquisition complete"
        );

        Ok(Acquisition {
            source: url,
            report,
        })
    }

    /// Run one acquisition and fold the outcome into an [`AcquisitionResult`].
    pub async fn run(&self, sources: &[String], target: &TargetDirectory) -> AcquisitionResult {
        let result = self.acquire(sources, target).await;
        if let Err(ref e) = result {
            error!(error = %e, "Download error");
        }
        AcquisitionResult::from(&result)
    }
}
