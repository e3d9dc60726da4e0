//! The managed directory that holds acquired game files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DirectoryError;

/// A single flat directory owned by the subsystem.
///
/// Canonical files live directly inside it, never in subdirectories. The
/// directory is created lazily by [`ensure`](Self::ensure) and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    path: PathBuf,
}

impl TargetDirectory {
    /// Create a handle for `path`.
    ///
    /// Relative paths are resolved against the current working directory so
    /// the handle always refers to an absolute location.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&path))
                .unwrap_or(path)
        };
        Self { path }
    }

    /// The absolute directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file with the given name directly inside the directory.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Create the directory (and parents) if absent.
    ///
    /// Idempotent. Fails only when the path cannot be created or exists as
    /// something other than a directory.
    pub fn ensure(&self) -> Result<PathBuf, DirectoryError> {
        fs::create_dir_all(&self.path).map_err(|e| DirectoryError::new(&self.path, e))?;
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let dir = TargetDirectory::new(temp.path().join("a").join("b").join("doom"));

        let path = dir.ensure().unwrap();

        assert!(path.is_dir());
        assert_eq!(path, dir.path());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = TargetDirectory::new(temp.path().join("doom"));

        dir.ensure().unwrap();
        fs::write(dir.file_path("DOOM.EXE"), b"exe").unwrap();
        dir.ensure().unwrap();

        assert!(dir.file_path("DOOM.EXE").exists());
    }

    #[test]
    fn test_ensure_fails_when_path_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("doom");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = TargetDirectory::new(&blocker).ensure().unwrap_err();
        assert_eq!(err.path, blocker);
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let dir = TargetDirectory::new("relative/doom");
        assert!(dir.path().is_absolute());
        assert!(dir.path().ends_with("relative/doom"));
    }

    #[test]
    fn test_file_path_joins_name() {
        let dir = TargetDirectory::new("/games/doom");
        assert_eq!(
            dir.file_path("DOOM1.WAD"),
            PathBuf::from("/games/doom/DOOM1.WAD")
        );
    }
}
