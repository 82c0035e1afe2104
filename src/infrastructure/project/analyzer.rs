//! Project analyzer
//!
//! Builds a `ProjectDefinition` from a project file (`*.csproj`, `*.fsproj`,
//! `*.vbproj`, `*.proj`) or a directory containing one. Only the handful of
//! facts recipe rules look at are extracted; this is not an MSBuild evaluator.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::domain::entities::ProjectDefinition;
use crate::domain::ports::FileSystem;
use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::LocalFs;

/// Extensions recognized as project files
pub const PROJECT_EXTENSIONS: &[&str] = &["csproj", "fsproj", "vbproj", "proj"];

fn sdk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<Project\s[^>]*Sdk\s*=\s*"([^"]+)""#).expect("valid regex"))
}

fn property_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<([A-Za-z_][\w.]*)>([^<]*)</([A-Za-z_][\w.]*)>").expect("valid regex")
    })
}

fn package_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<PackageReference\s[^>]*Include\s*=\s*"([^"]+)""#).expect("valid regex")
    })
}

pub struct ProjectAnalyzer<F: FileSystem = LocalFs> {
    fs: F,
}

impl ProjectAnalyzer<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for ProjectAnalyzer<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> ProjectAnalyzer<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn analyze(&self, path: &Path) -> StackwrightResult<ProjectDefinition> {
        if !self.fs.exists(path) {
            return Err(StackwrightError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }
        let path = self
            .fs
            .canonicalize(path)
            .map_err(|e| StackwrightError::Io(e.into()))?;

        let project_file = if self.fs.is_dir(&path) {
            self.find_project_file(&path)?
        } else {
            Some(path.clone())
        };

        let mut project = match &project_file {
            Some(file) => {
                let content = self
                    .fs
                    .read(file)
                    .map_err(|e| StackwrightError::Io(e.into()))?;
                parse_project_file(ProjectDefinition::for_file(file), &content)
            }
            None => ProjectDefinition::for_directory(&path),
        };

        let dir = project.project_dir().to_path_buf();
        for entry in self
            .fs
            .list_dir(&dir)
            .map_err(|e| StackwrightError::Io(e.into()))?
        {
            if self.fs.is_dir(&entry) {
                continue;
            }
            if let Some(name) = entry.file_name() {
                project = project.with_file(name.to_string_lossy());
            }
        }

        debug!(
            project = %project.project_path().display(),
            sdk = ?project.sdk(),
            framework = ?project.target_framework(),
            "analyzed project"
        );
        Ok(project)
    }

    fn find_project_file(&self, dir: &Path) -> StackwrightResult<Option<PathBuf>> {
        let entries = self
            .fs
            .list_dir(dir)
            .map_err(|e| StackwrightError::Io(e.into()))?;
        Ok(entries.into_iter().find(|p| {
            !self.fs.is_dir(p)
                && p.extension().is_some_and(|ext| {
                    PROJECT_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
        }))
    }
}

/// Extract SDK, properties and package references from project XML
pub fn parse_project_file(mut project: ProjectDefinition, content: &str) -> ProjectDefinition {
    if let Some(sdk) = sdk_re().captures(content).and_then(|c| c.get(1)) {
        project = project.with_sdk(sdk.as_str().trim());
    }

    for caps in property_re().captures_iter(content) {
        let (open, value, close) = (&caps[1], caps[2].trim(), &caps[3]);
        if open != close {
            continue;
        }
        if open == "TargetFramework" {
            project = project.with_target_framework(value);
        } else if open == "TargetFrameworks" && project.target_framework().is_none() {
            if let Some(first) = value.split(';').map(str::trim).find(|s| !s.is_empty()) {
                project = project.with_target_framework(first);
            }
        }
        project = project.with_property(open, value);
    }

    for caps in package_re().captures_iter(content) {
        project = project.with_package_reference(caps[1].trim());
    }
    project
}
