//! Orchestrator session
//!
//! Per-invocation context created once by the CLI and shared read-only by
//! every component.

use super::ProjectDefinition;
use crate::domain::value_objects::HostCapabilities;

/// Target account and region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsContext {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub account: Option<String>,
}

impl AwsContext {
    /// Bootstrap scope `aws://<account>/<region>`
    pub fn environment_uri(&self) -> String {
        format!(
            "aws://{}/{}",
            self.account.as_deref().unwrap_or("unknown-account"),
            self.region.as_deref().unwrap_or("unknown-region")
        )
    }
}

/// Resolved credential context handed to the external tool.
///
/// Resolution itself happens outside this crate; the handle only carries what
/// the subprocess needs in its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHandle {
    pub profile: String,
}

impl CredentialHandle {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    pub fn env_vars(&self, aws: &AwsContext) -> Vec<(String, String)> {
        let mut vars = vec![("AWS_PROFILE".to_string(), self.profile.clone())];
        if let Some(region) = &aws.region {
            vars.push(("AWS_REGION".to_string(), region.clone()));
        }
        vars
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorSession {
    pub project: ProjectDefinition,
    pub capabilities: HostCapabilities,
    pub aws: AwsContext,
    pub credentials: Option<CredentialHandle>,
    /// Cloud application (stack) name, if one was given
    pub application_name: Option<String>,
}

impl OrchestratorSession {
    pub fn new(project: ProjectDefinition, capabilities: HostCapabilities) -> Self {
        Self {
            project,
            capabilities,
            aws: AwsContext::default(),
            credentials: None,
            application_name: None,
        }
    }

    pub fn with_aws(mut self, aws: AwsContext) -> Self {
        self.aws = aws;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<CredentialHandle>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Name substituted for `{StackName}`: the application name, or the
    /// project's assembly name when none was given.
    pub fn stack_name(&self) -> String {
        self.application_name
            .clone()
            .unwrap_or_else(|| self.project.assembly_name().to_string())
    }
}
