//! Cloud application identity and the persisted deployment record

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::DeploymentStatus;

/// Logical identity of a deployed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudApplication {
    pub name: String,
    pub recipe_id: String,
    pub recipe_version: String,
}

impl CloudApplication {
    pub fn new(
        name: impl Into<String>,
        recipe_id: impl Into<String>,
        recipe_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            recipe_id: recipe_id.into(),
            recipe_version: recipe_version.into(),
        }
    }
}

/// Prior settings for one project, as persisted between invocations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub project_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub application: CloudApplication,
    #[serde(default)]
    pub option_values: BTreeMap<String, Value>,
    #[serde(default)]
    pub status: DeploymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub updated_at: DateTime<Utc>,
}

impl DeploymentRecord {
    /// Prior values apply only to the same application and recipe
    pub fn applies_to(&self, application: &str, recipe_id: &str) -> bool {
        self.application.name == application && self.application.recipe_id == recipe_id
    }
}
