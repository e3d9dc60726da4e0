//! Validated reads of canonical files from the target directory.
//!
//! A request names one file. Before anything is opened the name is checked:
//!
//! 1. it must be a single plain path component (no separators, `..`, root)
//! 2. its extension must be on the allow-list
//! 3. a symlink must resolve to somewhere inside the directory
//! 4. it must exist as a regular file
//! 5. its resolved location must still be inside the directory
//!
//! Failing 4 yields [`ServeError::NotFound`]; every other failure yields
//! [`ServeError::Forbidden`]. A dangling symlink fails 3.

use std::path::{Component, Path};

use tokio::fs::File;
use tracing::{debug, warn};

use crate::config::defaults::ALLOWED_EXTENSIONS;
use crate::directory::TargetDirectory;
use crate::error::{ServeError, ServeResult};

/// An opened file ready to be streamed.
#[derive(Debug)]
pub struct ServedFile {
    /// The open file handle.
    pub file: File,
    /// File length in bytes.
    pub len: u64,
    /// The requested name.
    pub name: String,
}

/// Opens files from the target directory under a fixed extension allow-list.
#[derive(Debug, Clone, Copy)]
pub struct SecureFileServer {
    allowed_extensions: &'static [&'static str],
}

impl Default for SecureFileServer {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureFileServer {
    /// Create a server using [`ALLOWED_EXTENSIONS`].
    pub fn new() -> Self {
        Self {
            allowed_extensions: ALLOWED_EXTENSIONS,
        }
    }

    /// Create a server with a custom allow-list (uppercase, without dot).
    pub fn with_allowed_extensions(allowed_extensions: &'static [&'static str]) -> Self {
        Self { allowed_extensions }
    }

    /// Check a requested name without touching the filesystem.
    pub fn is_permitted(&self, name: &str) -> bool {
        is_single_component(name) && self.has_allowed_extension(name)
    }

    /// Validate `name` and open it for reading.
    pub async fn serve(&self, name: &str, target: &TargetDirectory) -> ServeResult<ServedFile> {
        if !self.is_permitted(name) {
            warn!(name, "Rejected file request");
            return Err(ServeError::Forbidden);
        }

        let path = target.file_path(name);
        let link = match tokio::fs::symlink_metadata(&path).await {
            Ok(link) => link,
            Err(_) => {
                debug!(name, "Requested file not found");
                return Err(ServeError::NotFound);
            }
        };

        let root = tokio::fs::canonicalize(target.path()).await?;
        if link.file_type().is_symlink() {
            let inside = tokio::fs::canonicalize(&path)
                .await
                .is_ok_and(|resolved| resolved.starts_with(&root));
            if !inside {
                warn!(name, "Symlink resolves outside directory");
                return Err(ServeError::Forbidden);
            }
        }

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => {
                debug!(name, "Requested file not found");
                return Err(ServeError::NotFound);
            }
        };

        let resolved = tokio::fs::canonicalize(&path).await?;
        if !resolved.starts_with(&root) {
            warn!(name, resolved = %resolved.display(), "File resolves outside directory");
            return Err(ServeError::Forbidden);
        }

        let file = File::open(&resolved).await?;
        debug!(name, bytes = metadata.len(), "Serving file");

        Ok(ServedFile {
            file,
            len: metadata.len(),
            name: name.to_string(),
        })
    }

    fn has_allowed_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// True when `name` is exactly one normal path component.
///
/// Backslashes are rejected outright so the check is the same on every
/// platform.
fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    fn target_with(files: &[(&str, &str)]) -> (TempDir, TargetDirectory) {
        let temp = TempDir::new().unwrap();
        let dir = TargetDirectory::new(temp.path().join("doom"));
        dir.ensure().unwrap();
        for (name, data) in files {
            fs::write(dir.file_path(name), data).unwrap();
        }
        (temp, dir)
    }

    #[tokio::test]
    async fn test_serves_present_file() {
        let (_temp, dir) = target_with(&[("DOOM.EXE", "exe-bytes")]);

        let mut served = SecureFileServer::new().serve("DOOM.EXE", &dir).await.unwrap();

        assert_eq!(served.len, 9);
        assert_eq!(served.name, "DOOM.EXE");
        let mut body = Vec::new();
        served.file.read_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"exe-bytes");
    }

    #[tokio::test]
    async fn test_extension_is_case_insensitive() {
        let (_temp, dir) = target_with(&[("doom1.wad", "wad")]);
        let served = SecureFileServer::new().serve("doom1.wad", &dir).await;
        assert!(served.is_ok());
    }

    #[tokio::test]
    async fn test_traversal_forbidden() {
        let (_temp, dir) = target_with(&[]);
        let server = SecureFileServer::new();

        for name in [
            "../../etc/passwd",
            "../DOOM.EXE",
            "/etc/DOOM.EXE",
            "sub/DOOM.EXE",
            "..\\DOOM.EXE",
            ".",
            "..",
        ] {
            let err = server.serve(name, &dir).await.unwrap_err();
            assert!(matches!(err, ServeError::Forbidden), "{name}");
        }
    }

    #[tokio::test]
    async fn test_disallowed_extension_forbidden_even_if_present() {
        let (_temp, dir) = target_with(&[("DOOM.TXT", "text"), ("README", "x")]);
        let server = SecureFileServer::new();

        assert!(matches!(
            server.serve("DOOM.TXT", &dir).await.unwrap_err(),
            ServeError::Forbidden
        ));
        assert!(matches!(
            server.serve("README", &dir).await.unwrap_err(),
            ServeError::Forbidden
        ));
    }

    #[tokio::test]
    async fn test_missing_file_not_found() {
        let (_temp, dir) = target_with(&[]);
        let err = SecureFileServer::new().serve("DOOM1.WAD", &dir).await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound));
    }

    #[tokio::test]
    async fn test_directory_named_like_file_not_found() {
        let (_temp, dir) = target_with(&[]);
        fs::create_dir(dir.file_path("GAME.WAD")).unwrap();
        let err = SecureFileServer::new().serve("GAME.WAD", &dir).await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_forbidden() {
        let (temp, dir) = target_with(&[]);
        let outside = temp.path().join("secret.wad");
        fs::write(&outside, b"secret").unwrap();
        std::os::unix::fs::symlink(&outside, dir.file_path("LINK.WAD")).unwrap();

        let err = SecureFileServer::new().serve("LINK.WAD", &dir).await.unwrap_err();
        assert!(matches!(err, ServeError::Forbidden));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_outside_forbidden() {
        let (temp, dir) = target_with(&[]);
        let outside = temp.path().join("missing.wad");
        std::os::unix::fs::symlink(&outside, dir.file_path("LINK.WAD")).unwrap();

        let err = SecureFileServer::new().serve("LINK.WAD", &dir).await.unwrap_err();
        assert!(matches!(err, ServeError::Forbidden));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_inside_directory_served() {
        let (_temp, dir) = target_with(&[("DOOM1.WAD", "wad-bytes")]);
        std::os::unix::fs::symlink(dir.file_path("DOOM1.WAD"), dir.file_path("LINK.WAD"))
            .unwrap();

        let served = SecureFileServer::new().serve("LINK.WAD", &dir).await.unwrap();
        assert_eq!(served.len, 9);
    }

    #[test]
    fn test_is_permitted() {
        let server = SecureFileServer::new();
        assert!(server.is_permitted("DOOM.EXE"));
        assert!(server.is_permitted("play.bat"));
        assert!(server.is_permitted("CWSDPMI.COM"));
        assert!(!server.is_permitted("DOOM.EXE/"));
        assert!(!server.is_permitted(""));
        assert!(!server.is_permitted("WAD"));
    }

    #[test]
    fn test_custom_allow_list() {
        let server = SecureFileServer::with_allowed_extensions(&["WAD"]);
        assert!(server.is_permitted("DOOM1.WAD"));
        assert!(!server.is_permitted("DOOM.EXE"));
    }
}
