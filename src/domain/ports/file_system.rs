//! FileSystem port - abstraction over file I/O operations
//!
//! The save-directory governor, materializer and recipe loader go through this
//! trait so they can be exercised against temporary directories and fakes.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// Path does not exist
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// Other I/O error at a path
    Io { path: PathBuf, source: std::io::Error },
    /// Other error
    Other(String),
}

impl FsError {
    /// Attach the path an I/O error happened at
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "Not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io { path, source } => write!(f, "I/O error at {}: {}", path.display(), source),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FsError> for std::io::Error {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Io { source, .. } => source,
            FsError::NotFound(path) => std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            ),
            FsError::PermissionDenied(path) => std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ),
            FsError::Other(msg) => std::io::Error::other(msg),
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFileSystem` - standard file I/O with atomic writes
pub trait FileSystem: Send + Sync {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically (temp file + rename)
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Write raw bytes atomically
    fn write_bytes(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Directory exists and has no entries
    fn is_empty_dir(&self, path: &Path) -> FsResult<bool>;

    /// Immediate children of a directory
    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>>;

    /// All files below a directory, hidden files included
    fn list_files_recursive(&self, path: &Path) -> FsResult<Vec<PathBuf>>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf>;
}
