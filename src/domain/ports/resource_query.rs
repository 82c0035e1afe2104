//! ResourceQueryService port
//!
//! Lists existing cloud resources for type-hint lookups. The cloud calls live
//! behind this trait; retries are the implementation's concern.

use crate::domain::entities::AwsContext;

/// Kind of remote resource a type hint can look up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    EcsCluster,
    BeanstalkApplication,
    IamRole,
    Vpc,
    Ec2KeyPair,
}

impl ResourceKind {
    /// Key used in inventory files and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::EcsCluster => "EcsCluster",
            ResourceKind::BeanstalkApplication => "BeanstalkApplication",
            ResourceKind::IamRole => "IamRole",
            ResourceKind::Vpc => "Vpc",
            ResourceKind::Ec2KeyPair => "Ec2KeyPair",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing resource returned by a query
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteResource {
    /// Reference stored in the setting (id or ARN)
    pub id: String,
    /// Human-readable name shown in prompts
    #[serde(default)]
    pub name: String,
}

impl RemoteResource {
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResourceQueryError {
    /// Temporary failure (throttling, network); worth retrying
    #[error("{0}")]
    Transient(String),

    #[error("access denied: {0}")]
    Denied(String),

    #[error("{0}")]
    Failed(String),
}

impl ResourceQueryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResourceQueryError::Transient(_))
    }
}

pub trait ResourceQueryService: Send + Sync {
    fn list(
        &self,
        kind: ResourceKind,
        aws: &AwsContext,
    ) -> Result<Vec<RemoteResource>, ResourceQueryError>;
}
