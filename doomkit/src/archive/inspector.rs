//! In-memory ZIP inspection and canonical file extraction.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use tracing::{debug, error, info};
use zip::ZipArchive;

use super::rules::{
    base_name, classify_with, normalize, CanonicalRole, ClassificationRule, RULES,
};
use crate::config::defaults::DEFAULT_MAX_ARCHIVE_BYTES;
use crate::directory::TargetDirectory;
use crate::error::{AcquireError, AcquireResult};

/// Maximum number of entry names kept for diagnostics.
pub const DIAGNOSTIC_SAMPLE_SIZE: usize = 10;

/// Outcome of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Roles whose canonical file was written, in role order.
    pub roles: Vec<CanonicalRole>,
    /// Number of file entries in the archive.
    pub entries_seen: usize,
    /// Matched entries that could not be read or written.
    pub failed_entries: usize,
}

impl ExtractionReport {
    /// Canonical filenames that were written.
    pub fn files(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|role| role.file_name().to_string())
            .collect()
    }
}

/// Extracts recognized payload files from an archive.
///
/// Each file entry is matched by its uppercase base name against an ordered
/// rule table. A match is written under its role's canonical filename; a later
/// match for the same role overwrites the earlier one.
///
/// An entry that decompresses past `max_entry_bytes` counts as a failed entry.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveInspector {
    rules: &'static [ClassificationRule],
    max_entry_bytes: u64,
}

impl Default for ArchiveInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveInspector {
    /// Create an inspector using the built-in [`RULES`].
    pub fn new() -> Self {
        Self {
            rules: RULES,
            max_entry_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
        }
    }

    /// Create an inspector with a custom rule table.
    pub fn with_rules(rules: &'static [ClassificationRule]) -> Self {
        Self {
            rules,
            ..Self::new()
        }
    }

    /// Set the largest decompressed size accepted for one entry.
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: u64) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    /// Classify a raw entry path. Directory entries never match.
    pub fn classify(&self, entry_name: &str) -> Option<CanonicalRole> {
        let base = base_name(entry_name)?;
        classify_with(self.rules, &normalize(base))
    }

    /// Extract recognized entries from `payload` into `target`.
    ///
    /// Per-entry read and write failures are logged and skipped; the pass
    /// succeeds as long as at least one canonical file was written.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::InvalidArchive`] if the payload is not a ZIP archive
    /// - [`AcquireError::NoRecognizedFiles`] if nothing was written
    pub fn extract(
        &self,
        payload: &[u8],
        target: &TargetDirectory,
    ) -> AcquireResult<ExtractionReport> {
        let mut archive = ZipArchive::new(Cursor::new(payload))
            .map_err(|e| AcquireError::InvalidArchive(e.to_string()))?;

        let mut written = BTreeSet::new();
        let mut sample = Vec::new();
        let mut entries_seen = 0;
        let mut failed_entries = 0;

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    error!(index, error = %e, "Failed to open archive entry");
                    failed_entries += 1;
                    continue;
                }
            };

            if entry.is_dir() {
                continue;
            }
            let entry_name = entry.name().to_string();
            let Some(base) = base_name(&entry_name) else {
                continue;
            };

            entries_seen += 1;
            if sample.len() < DIAGNOSTIC_SAMPLE_SIZE {
                sample.push(base.to_string());
            }

            let Some(role) = classify_with(self.rules, &normalize(base)) else {
                debug!(entry = %entry_name, "Skipping unrecognized entry");
                continue;
            };

            let dest = target.file_path(role.file_name());
            match write_entry(&mut entry, &dest, self.max_entry_bytes) {
                Ok(bytes) => {
                    if !written.insert(role) {
                        debug!(
                            entry = %entry_name,
                            file = role.file_name(),
                            "Replaced earlier match"
                        );
                    }
                    info!(entry = %entry_name, file = role.file_name(), bytes, "Extracted");
                }
                Err(e) => {
                    error!(entry = %entry_name, error = %e, "Error extracting entry");
                    failed_entries += 1;
                }
            }
        }

        if written.is_empty() {
            return Err(AcquireError::NoRecognizedFiles { sample });
        }

        Ok(ExtractionReport {
            roles: written.into_iter().collect(),
            entries_seen,
            failed_entries,
        })
    }
}

/// Read an entry of at most `limit` bytes, then move it into place under `dest`.
///
/// Content is staged in a sibling `.part` file and renamed over `dest`, so
/// readers never observe a half-written canonical file.
fn write_entry(entry: &mut impl Read, dest: &Path, limit: u64) -> io::Result<u64> {
    let mut data = Vec::new();
    entry.take(limit.saturating_add(1)).read_to_end(&mut data)?;
    if data.len() as u64 > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("entry exceeds {limit} bytes"),
        ));
    }

    let mut staging = dest.as_os_str().to_owned();
    staging.push(".part");
    let staging = Path::new(&staging);

    if let Err(e) = fs::write(staging, &data).and_then(|_| fs::rename(staging, dest)) {
        let _ = fs::remove_file(staging);
        return Err(e);
    }

    Ok(data.len() as u64)
}
