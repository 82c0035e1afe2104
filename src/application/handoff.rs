//! Handoff orchestrator
//!
//! Drives the external synthesis/deploy tool over a materialized project:
//! an optional bootstrap step scoped to `aws://<account>/<region>`, then the
//! deploy step with the execution environment variable and the settings
//! payload passed as a context parameter.

use std::time::Duration;

use tracing::info;

use crate::domain::entities::{OrchestratorSession, Recipe};
use crate::domain::ports::{
    DeployEventSink, ExternalTool, HandoffStep, ToolError, ToolInvocation,
};
use crate::error::{StackwrightError, StackwrightResult};

use super::materialize::MaterializedProject;

/// Tool settings taken from the `[deploy]` configuration section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffSettings {
    pub program: String,
    pub bootstrap: bool,
    pub execution_env_key: String,
    pub settings_context_key: String,
    pub timeout: Option<Duration>,
}

impl Default for HandoffSettings {
    fn default() -> Self {
        Self {
            program: "cdk".to_string(),
            bootstrap: true,
            execution_env_key: "AWS_EXECUTION_ENV".to_string(),
            settings_context_key: "StackwrightSettingsPath".to_string(),
            timeout: None,
        }
    }
}

pub struct HandoffOrchestrator<'a> {
    tool: &'a dyn ExternalTool,
    settings: &'a HandoffSettings,
}

impl<'a> HandoffOrchestrator<'a> {
    pub fn new(tool: &'a dyn ExternalTool, settings: &'a HandoffSettings) -> Self {
        Self { tool, settings }
    }

    /// Every step needs credentials; check before anything runs
    pub fn check_credentials(&self, session: &OrchestratorSession) -> StackwrightResult<()> {
        if session.credentials.is_some() {
            return Ok(());
        }
        let step = if self.settings.bootstrap {
            HandoffStep::Bootstrap
        } else {
            HandoffStep::Deploy
        };
        Err(StackwrightError::MissingCredentials {
            step: step.to_string(),
        })
    }

    /// Step invocations in execution order
    pub fn plan(
        &self,
        recipe: &Recipe,
        session: &OrchestratorSession,
        project: &MaterializedProject,
    ) -> StackwrightResult<Vec<ToolInvocation>> {
        self.check_credentials(session)?;
        let credential_env = session
            .credentials
            .as_ref()
            .map(|c| c.env_vars(&session.aws))
            .unwrap_or_default();

        let mut steps = Vec::with_capacity(2);
        if self.settings.bootstrap {
            steps.push(ToolInvocation {
                step: HandoffStep::Bootstrap,
                program: self.settings.program.clone(),
                args: vec!["bootstrap".to_string(), session.aws.environment_uri()],
                working_dir: project.directory.clone(),
                env: credential_env.clone(),
                timeout: self.settings.timeout,
            });
        }

        let mut env = credential_env;
        env.push((
            self.settings.execution_env_key.clone(),
            recipe.execution_environment(),
        ));
        steps.push(ToolInvocation {
            step: HandoffStep::Deploy,
            program: self.settings.program.clone(),
            args: vec![
                "deploy".to_string(),
                "--require-approval".to_string(),
                "never".to_string(),
                "-c".to_string(),
                format!(
                    "{}={}",
                    self.settings.settings_context_key,
                    project.settings_path.display()
                ),
            ],
            working_dir: project.directory.clone(),
            env,
            timeout: self.settings.timeout,
        });
        Ok(steps)
    }

    /// Run the steps in order, stopping at the first failure
    pub fn run(
        &self,
        recipe: &Recipe,
        session: &OrchestratorSession,
        project: &MaterializedProject,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<()> {
        for invocation in self.plan(recipe, session, project)? {
            info!(
                step = %invocation.step,
                recipe = %recipe.id,
                command = %invocation.command_line(),
                "running handoff step"
            );
            let exit = self
                .tool
                .run(&invocation, sink)
                .map_err(|err| interrupted(invocation.step, recipe, err))?;
            if !exit.success() {
                return Err(StackwrightError::SubprocessFailed {
                    step: invocation.step.to_string(),
                    recipe: recipe.id.clone(),
                    code: exit.code,
                });
            }
        }
        Ok(())
    }
}

fn interrupted(step: HandoffStep, recipe: &Recipe, err: ToolError) -> StackwrightError {
    StackwrightError::HandoffInterrupted {
        step: step.to_string(),
        recipe: recipe.id.clone(),
        message: err.to_string(),
    }
}
