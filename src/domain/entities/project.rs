//! Project definition entity
//!
//! Read-only facts about the application project being deployed. Produced once
//! by the project analyzer and consumed by rule evaluation, settings
//! resolution and save-location derivation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use semver::Version;

/// Analyzed metadata of the target application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefinition {
    project_path: PathBuf,
    project_dir: PathBuf,
    assembly_name: String,
    sdk: Option<String>,
    target_framework: Option<String>,
    runtime_version: Option<Version>,
    properties: BTreeMap<String, String>,
    package_references: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl ProjectDefinition {
    /// Definition for a project described by a project file (e.g. `App/App.csproj`).
    ///
    /// The project directory is the file's parent; the assembly name is the file stem.
    pub fn for_file(project_file: impl Into<PathBuf>) -> Self {
        let project_path: PathBuf = project_file.into();
        let project_dir = project_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let assembly_name = project_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::with_parts(project_path, project_dir, assembly_name)
    }

    /// Definition for a project identified only by its directory.
    pub fn for_directory(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir: PathBuf = project_dir.into();
        let assembly_name = project_dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::with_parts(project_dir.clone(), project_dir, assembly_name)
    }

    fn with_parts(project_path: PathBuf, project_dir: PathBuf, assembly_name: String) -> Self {
        Self {
            project_path,
            project_dir,
            assembly_name,
            sdk: None,
            target_framework: None,
            runtime_version: None,
            properties: BTreeMap::new(),
            package_references: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }

    pub fn with_assembly_name(mut self, name: impl Into<String>) -> Self {
        self.assembly_name = name.into();
        self
    }

    pub fn with_sdk(mut self, sdk: impl Into<String>) -> Self {
        self.sdk = Some(sdk.into());
        self
    }

    /// Set the target framework moniker; the runtime version is derived from it.
    pub fn with_target_framework(mut self, framework: impl Into<String>) -> Self {
        let framework = framework.into();
        self.runtime_version = parse_runtime_version(&framework);
        self.target_framework = Some(framework);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_package_reference(mut self, name: impl Into<String>) -> Self {
        self.package_references.insert(name.into());
        self
    }

    /// Record a file present in the project directory (path relative to it).
    pub fn with_file(mut self, relative: impl Into<String>) -> Self {
        self.files.insert(relative.into().replace('\\', "/"));
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    pub fn sdk(&self) -> Option<&str> {
        self.sdk.as_deref()
    }

    pub fn target_framework(&self) -> Option<&str> {
        self.target_framework.as_deref()
    }

    pub fn runtime_version(&self) -> Option<&Version> {
        self.runtime_version.as_ref()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Package references are matched case-insensitively
    pub fn references_package(&self, name: &str) -> bool {
        self.package_references
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
    }

    pub fn package_references(&self) -> impl Iterator<Item = &str> {
        self.package_references.iter().map(String::as_str)
    }

    pub fn has_file(&self, relative: &str) -> bool {
        self.files.contains(&relative.replace('\\', "/"))
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

/// Derive a semantic version from a framework moniker.
///
/// `net6.0` → 6.0.0, `netcoreapp3.1` → 3.1.0, `net8.0-windows` → 8.0.0,
/// `node18` → 18.0.0. Returns `None` when no version digits are present.
pub fn parse_runtime_version(framework: &str) -> Option<Version> {
    let base = framework.split('-').next().unwrap_or(framework);
    let digits = base.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    if digits.is_empty() || !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut parts = digits
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if parts.len() > 3 {
        return None;
    }
    parts.resize(3, 0);
    Some(Version::new(parts[0], parts[1], parts[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_file_derives_dir_and_assembly() {
        let project = ProjectDefinition::for_file("/code/App/App.proj");
        assert_eq!(project.project_dir(), Path::new("/code/App"));
        assert_eq!(project.assembly_name(), "App");
    }

    #[test]
    fn for_directory_uses_dir_name() {
        let project = ProjectDefinition::for_directory("/code/Worker");
        assert_eq!(project.project_path(), Path::new("/code/Worker"));
        assert_eq!(project.assembly_name(), "Worker");
    }

    #[test]
    fn parse_runtime_version_handles_monikers() {
        assert_eq!(parse_runtime_version("net6.0"), Some(Version::new(6, 0, 0)));
        assert_eq!(
            parse_runtime_version("netcoreapp3.1"),
            Some(Version::new(3, 1, 0))
        );
        assert_eq!(
            parse_runtime_version("net8.0-windows"),
            Some(Version::new(8, 0, 0))
        );
        assert_eq!(parse_runtime_version("node18"), Some(Version::new(18, 0, 0)));
        assert_eq!(parse_runtime_version("netstandard"), None);
        assert_eq!(parse_runtime_version("net1.2.3.4"), None);
    }

    #[test]
    fn package_lookup_ignores_case() {
        let project =
            ProjectDefinition::for_directory("/code/App").with_package_reference("AWSSDK.S3");
        assert!(project.references_package("awssdk.s3"));
        assert!(!project.references_package("AWSSDK.SQS"));
    }

    #[test]
    fn files_use_forward_slashes() {
        let project = ProjectDefinition::for_directory("/code/App").with_file("docker\\Dockerfile");
        assert!(project.has_file("docker/Dockerfile"));
    }
}
