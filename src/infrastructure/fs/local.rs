//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temporary file in the target directory and are renamed into
/// place, so an interrupted write never leaves a partial file behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

/// Write `content` to `path` through a sibling temp file and rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> FsResult<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
    tmp.write_all(content).map_err(|e| FsError::at(path, e))?;
    tmp.as_file().sync_all().map_err(|e| FsError::at(path, e))?;
    tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        atomic_write(path, content.as_bytes())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        atomic_write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_empty_dir(&self, path: &Path) -> FsResult<bool> {
        let mut entries = std::fs::read_dir(path).map_err(|e| FsError::at(path, e))?;
        Ok(entries.next().is_none())
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| FsError::at(path, e))? {
            children.push(entry.map_err(|e| FsError::at(path, e))?.path());
        }
        children.sort();
        Ok(children)
    }

    fn list_files_recursive(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        if !path.is_dir() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }

        let walker = WalkBuilder::new(path)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(true)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| FsError::Other(format!("{}: {}", path.display(), e)))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| FsError::at(path, e))
    }
}
