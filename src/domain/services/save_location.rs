//! Save location rules
//!
//! Pure path logic behind the save-directory governor: the default sibling
//! directory name and the empty/not-nested checks. The governor supplies the
//! filesystem facts.

use std::path::{Component, Path, PathBuf};

/// Suffix appended to the project directory name for the default location
pub const DEFAULT_DIR_SUFFIX: &str = "DeploymentProject";

pub const NOT_EMPTY_MESSAGE: &str =
    "The directory specified for saving the deployment project is non-empty. Please provide an empty directory path and try again.";

pub const NESTED_MESSAGE: &str =
    "The directory specified for saving the deployment project is inside the project directory. Please provide a directory outside the project and try again.";

/// Sibling of `project_dir` named `<ProjectDirName>DeploymentProject`, with
/// `1, 2, ...` appended until `exists` reports a free name.
pub fn default_save_directory(project_dir: &Path, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let project_dir = normalize(project_dir);
    let parent = project_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let dir_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let base = format!("{}{}", dir_name, DEFAULT_DIR_SUFFIX);
    let mut candidate = parent.join(&base);
    let mut suffix = 1u32;
    while exists(&candidate) {
        candidate = parent.join(format!("{}{}", base, suffix));
        suffix += 1;
    }
    candidate
}

/// `dir` is `project_dir` or somewhere below it
pub fn is_nested(dir: &Path, project_dir: &Path) -> bool {
    normalize(dir).starts_with(normalize(project_dir))
}

/// Every reason `dir` cannot hold a generated project. Both checks always run.
pub fn validation_failures(dir: &Path, is_empty: bool, project_dir: &Path) -> Vec<&'static str> {
    let mut failures = Vec::new();
    if !is_empty {
        failures.push(NOT_EMPTY_MESSAGE);
    }
    if is_nested(dir, project_dir) {
        failures.push(NESTED_MESSAGE);
    }
    failures
}

/// Lexical normalization: drops `.` and folds `..` without touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    _ => false,
                };
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
