//! Deployment status value object

use serde::{Deserialize, Serialize};

/// Progress of a handed-off deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentStatus {
    /// Project materialized, handoff not started
    #[default]
    Pending,
    /// Bootstrap or deploy step running
    InProgress,
    /// Deploy step exited successfully
    Succeeded,
    /// A step failed or was interrupted
    Failed,
}

impl DeploymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentStatus::Succeeded | DeploymentStatus::Failed)
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentStatus::Pending => write!(f, "pending"),
            DeploymentStatus::InProgress => write!(f, "in-progress"),
            DeploymentStatus::Succeeded => write!(f, "succeeded"),
            DeploymentStatus::Failed => write!(f, "failed"),
        }
    }
}
