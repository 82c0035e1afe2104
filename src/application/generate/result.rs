//! Generate Result

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::application::materialize::MaterializedProject;

/// Result of a generate operation
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub recipe_id: String,
    pub recipe_version: String,
    pub recipe_name: String,
    /// Whether this invocation created the save directory
    pub created: bool,
    pub project: MaterializedProject,
    /// Resolved option values, as written to the settings payload
    pub settings: BTreeMap<String, Value>,
}

impl GenerateResult {
    pub fn destination(&self) -> &PathBuf {
        &self.project.directory
    }

    pub fn file_count(&self) -> usize {
        self.project.files.len()
    }
}
