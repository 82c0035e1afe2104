//! Save-directory governor
//!
//! Chooses and validates the directory a deployment project is generated
//! into. A directory created here is removed again on every failure path
//! (validation, declined confirmation) before the error surfaces.

use std::path::{Path, PathBuf};

use scopeguard::ScopeGuard;
use tracing::{debug, warn};

use crate::domain::entities::ProjectDefinition;
use crate::domain::ports::{Confirmer, FileSystem, SourceControlProbe};
use crate::domain::services::save_location::{
    default_save_directory, normalize, validation_failures,
};
use crate::domain::value_objects::SaveCdkDirectory;
use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::LocalFs;

pub const NOT_UNDER_SOURCE_CONTROL_PROMPT: &str =
    "The deployment project is not saved under source control. It is recommended to keep it in source control to track changes. Do you still want to continue?";

pub struct SaveDirectoryGovernor<'a, F: FileSystem = LocalFs> {
    fs: F,
    probe: &'a dyn SourceControlProbe,
    confirmer: &'a dyn Confirmer,
    cwd: PathBuf,
    advisory: bool,
}

impl<'a> SaveDirectoryGovernor<'a, LocalFs> {
    pub fn new(
        probe: &'a dyn SourceControlProbe,
        confirmer: &'a dyn Confirmer,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self::with_fs(LocalFs::new(), probe, confirmer, cwd)
    }
}

impl<'a, F: FileSystem> SaveDirectoryGovernor<'a, F> {
    pub fn with_fs(
        fs: F,
        probe: &'a dyn SourceControlProbe,
        confirmer: &'a dyn Confirmer,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            probe,
            confirmer,
            cwd: cwd.into(),
            advisory: true,
        }
    }

    /// Skip the source control question (used for internal workspaces)
    pub fn without_advisory(mut self) -> Self {
        self.advisory = false;
        self
    }

    /// Resolve, create if needed, and validate the save directory.
    pub fn prepare(
        &self,
        requested: Option<&Path>,
        project: &ProjectDefinition,
    ) -> StackwrightResult<SaveCdkDirectory> {
        let path = match requested {
            Some(p) if p.is_absolute() => normalize(p),
            Some(p) => normalize(&self.cwd.join(p)),
            None => default_save_directory(project.project_dir(), |p| self.fs.exists(p)),
        };

        let existed = self.fs.exists(&path);
        if existed && !self.fs.is_dir(&path) {
            return Err(StackwrightError::InvalidSaveDirectory {
                path,
                message: "The path exists and is not a directory.".to_string(),
            });
        }
        let created_root = if existed {
            None
        } else {
            let root = self.topmost_missing(&path);
            self.fs
                .create_dir_all(&path)
                .map_err(|e| StackwrightError::Io(e.into()))?;
            debug!(path = %path.display(), root = %root.display(), "created save directory");
            Some(root)
        };

        let guard = scopeguard::guard(created_root, |created_root| {
            if let Some(root) = created_root {
                debug!(path = %root.display(), "rolling back save directory");
                if let Err(err) = self.fs.remove_dir_all(&root) {
                    warn!("failed to remove {}: {}", root.display(), err);
                }
            }
        });

        self.validate(&path, project)?;

        if self.advisory && !self.probe.is_under_source_control(&path) {
            debug!(path = %path.display(), "save directory is not under source control");
            if !self.confirmer.confirm(NOT_UNDER_SOURCE_CONTROL_PROMPT, true) {
                return Err(StackwrightError::Aborted);
            }
        }

        let save_dir = SaveCdkDirectory::new(path, false, requested.is_some());
        Ok(match ScopeGuard::into_inner(guard) {
            Some(root) => save_dir.with_created_root(root),
            None => save_dir,
        })
    }

    /// Highest ancestor of `path` (or `path` itself) that does not exist yet
    fn topmost_missing(&self, path: &Path) -> PathBuf {
        let mut top = path.to_path_buf();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() || self.fs.exists(ancestor) {
                break;
            }
            top = ancestor.to_path_buf();
        }
        top
    }

    fn validate(&self, path: &Path, project: &ProjectDefinition) -> StackwrightResult<()> {
        let is_empty = self
            .fs
            .is_empty_dir(path)
            .map_err(|e| StackwrightError::Io(e.into()))?;

        // Compare real paths so symlinks cannot hide nesting
        let dir = self
            .fs
            .canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf());
        let project_dir = self
            .fs
            .canonicalize(project.project_dir())
            .unwrap_or_else(|_| project.project_dir().to_path_buf());

        let failures = validation_failures(&dir, is_empty, &project_dir);
        if failures.is_empty() {
            return Ok(());
        }
        Err(StackwrightError::InvalidSaveDirectory {
            path: path.to_path_buf(),
            message: failures.join(" "),
        })
    }
}
