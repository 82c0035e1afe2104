//! Save directory value object

use std::path::{Path, PathBuf};

/// Location chosen for a generated deployment project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCdkDirectory {
    path: PathBuf,
    caller_specified: bool,
    /// Topmost directory this invocation created (the path itself or one of
    /// its ancestors)
    created_root: Option<PathBuf>,
}

impl SaveCdkDirectory {
    pub fn new(path: impl Into<PathBuf>, created: bool, caller_specified: bool) -> Self {
        let path = path.into();
        let created_root = created.then(|| path.clone());
        Self {
            path,
            caller_specified,
            created_root,
        }
    }

    /// Record that creating `path` also created the missing ancestors up to `root`
    pub fn with_created_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.created_root = Some(root.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this invocation created the directory
    pub fn created(&self) -> bool {
        self.created_root.is_some()
    }

    /// Directory to remove to undo the creation, if anything was created
    pub fn created_root(&self) -> Option<&Path> {
        self.created_root.as_deref()
    }

    /// Whether the caller named the directory (as opposed to a derived default)
    pub fn caller_specified(&self) -> bool {
        self.caller_specified
    }

    /// Final path component, used as the module name for caller-specified paths
    pub fn dir_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_name_is_last_component() {
        let dir = SaveCdkDirectory::new("/code/MyInfra", true, true);
        assert_eq!(dir.dir_name().as_deref(), Some("MyInfra"));
        assert!(dir.created());
        assert!(dir.caller_specified());
        assert_eq!(dir.created_root(), Some(Path::new("/code/MyInfra")));
    }

    #[test]
    fn created_root_can_be_an_ancestor() {
        let dir = SaveCdkDirectory::new("/code/infra/MyInfra", true, true)
            .with_created_root("/code/infra");
        assert_eq!(dir.created_root(), Some(Path::new("/code/infra")));

        let existing = SaveCdkDirectory::new("/code/MyInfra", false, true);
        assert!(!existing.created());
        assert_eq!(existing.created_root(), None);
    }
}
