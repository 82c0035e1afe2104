//! Deploy Result

use crate::application::materialize::MaterializedProject;
use crate::domain::value_objects::DeploymentStatus;

/// Result of a successful deploy
#[derive(Debug, Clone)]
pub struct DeployResult {
    /// Cloud application (stack) name
    pub application: String,
    pub recipe_id: String,
    pub recipe_version: String,
    pub project: MaterializedProject,
    pub status: DeploymentStatus,
}

impl DeployResult {
    pub fn is_success(&self) -> bool {
        self.status == DeploymentStatus::Succeeded
    }
}
