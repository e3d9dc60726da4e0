//! Presence report for the canonical files.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use crate::archive::CanonicalRole;
use crate::directory::TargetDirectory;

/// Which canonical files are currently on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Presence flag per role.
    pub present: BTreeMap<CanonicalRole, bool>,
    /// The directory that was checked.
    pub directory: PathBuf,
    /// Filesystem error, if any. All flags are false when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    /// Whether the file for `role` is present.
    pub fn has(&self, role: CanonicalRole) -> bool {
        self.present.get(&role).copied().unwrap_or(false)
    }

    /// Whether every required file is present.
    pub fn is_playable(&self) -> bool {
        CanonicalRole::ALL
            .iter()
            .filter(|role| role.is_required())
            .all(|role| self.has(*role))
    }

    /// Presence keyed by canonical filename.
    pub fn files(&self) -> BTreeMap<&'static str, bool> {
        self.present
            .iter()
            .map(|(role, present)| (role.file_name(), *present))
            .collect()
    }
}

/// Computes a [`StatusReport`] from the directory contents.
///
/// Stateless: each call checks the filesystem again, so files placed by hand
/// are reported without any prior acquisition.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusReporter;

impl StatusReporter {
    pub fn new() -> Self {
        Self
    }

    /// Check the directory. Never fails.
    pub fn status(&self, target: &TargetDirectory) -> StatusReport {
        let directory = target.path().to_path_buf();
        match scan(target) {
            Ok(present) => StatusReport {
                present,
                directory,
                error: None,
            },
            Err(e) => {
                warn!(dir = %directory.display(), error = %e, "Status check failed");
                StatusReport {
                    present: CanonicalRole::ALL.iter().map(|role| (*role, false)).collect(),
                    directory,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn scan(target: &TargetDirectory) -> io::Result<BTreeMap<CanonicalRole, bool>> {
    CanonicalRole::ALL
        .iter()
        .map(|role| {
            let path = target.file_path(role.file_name());
            Ok((*role, path.try_exists()?))
        })
        .collect()
}
