//! Deploy Use Case
//!
//! Orchestrates the deploy flow:
//! 1. Check the credential context (nothing runs without one)
//! 2. Recommend, select and resolve
//! 3. Generate a fresh project under the workspace
//! 4. Hand off to the external tool (bootstrap, deploy)
//! 5. Record the outcome in the prior-settings store

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::handoff::{HandoffOrchestrator, HandoffSettings};
use crate::application::materialize::{
    sanitize_module_name, MaterializedProject, ProjectMaterializer,
};
use crate::application::pipeline::{PlannedDeployment, PlanningPipeline};
use crate::application::save_directory::SaveDirectoryGovernor;
use crate::domain::entities::{
    CloudApplication, DeploymentRecord, OrchestratorSession, Recommendation,
};
use crate::domain::ports::{
    AssumeYes, DeployEvent, DeployEventSink, ExternalTool, FileSystem, RecipeRepository,
    SettingsRepository,
    SourceControlProbe, TypeHintRegistry,
};
use crate::domain::services::save_location::DEFAULT_DIR_SUFFIX;
use crate::domain::value_objects::DeploymentStatus;
use crate::error::StackwrightResult;
use crate::infrastructure::fs::LocalFs;

use super::options::DeployOptions;
use super::result::DeployResult;

/// The workspace is owned by stackwright; it never needs the advisory
struct NoProbe;

impl SourceControlProbe for NoProbe {
    fn is_under_source_control(&self, _dir: &std::path::Path) -> bool {
        true
    }
}

/// Deploy use case - generate, hand off, record
pub struct DeployUseCase<R, S>
where
    R: RecipeRepository,
    S: SettingsRepository,
{
    recipes: R,
    store: S,
    hints: TypeHintRegistry,
    tool: Box<dyn ExternalTool>,
    handoff: HandoffSettings,
}

impl<R, S> DeployUseCase<R, S>
where
    R: RecipeRepository,
    S: SettingsRepository,
{
    pub fn new(
        recipes: R,
        store: S,
        hints: TypeHintRegistry,
        tool: Box<dyn ExternalTool>,
        handoff: HandoffSettings,
    ) -> Self {
        Self {
            recipes,
            store,
            hints,
            tool,
            handoff,
        }
    }

    pub fn execute(
        &self,
        session: &OrchestratorSession,
        options: &DeployOptions,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<DeployResult> {
        let orchestrator = HandoffOrchestrator::new(self.tool.as_ref(), &self.handoff);
        orchestrator.check_credentials(session)?;

        let pipeline = PlanningPipeline::new(&self.recipes, &self.store, &self.hints);
        let PlannedDeployment {
            recommendation: rec,
            prior,
        } = pipeline.plan(session, options.recipe_id.as_deref(), &options.overrides)?;

        let project = self.generate(&rec, session, options, sink)?;
        let application = session.stack_name();

        sink.on_event(DeployEvent::StatusChanged {
            status: DeploymentStatus::InProgress,
        });
        let outcome = orchestrator.run(&rec.recipe, session, &project, sink);
        let status = if outcome.is_ok() {
            DeploymentStatus::Succeeded
        } else {
            DeploymentStatus::Failed
        };
        sink.on_event(DeployEvent::StatusChanged { status });

        let record = match (status, prior) {
            // A failed deploy keeps the values that last worked
            (DeploymentStatus::Failed, Some(mut prior)) => {
                prior.status = status;
                prior.output_dir = Some(project.directory.clone());
                prior.updated_at = Utc::now();
                prior
            }
            (DeploymentStatus::Failed, None) => {
                new_record(session, &rec, &application, BTreeMap::new(), status, &project)
            }
            _ => new_record(
                session,
                &rec,
                &application,
                rec.settings.clone(),
                status,
                &project,
            ),
        };
        if let Err(err) = self.store.save(&record) {
            warn!("failed to save deployment settings: {}", err);
        }

        sink.on_event(DeployEvent::Completed {
            destination: project.directory.clone(),
            status,
        });
        outcome?;

        info!(
            application = %application,
            recipe = %rec.recipe.id,
            "deployment succeeded"
        );
        Ok(DeployResult {
            application,
            recipe_id: rec.recipe.id.clone(),
            recipe_version: rec.recipe.version.to_string(),
            project,
            status,
        })
    }

    /// Fresh `<workspace>/<stack>-<token>/<Assembly>DeploymentProject`
    fn generate(
        &self,
        rec: &Recommendation,
        session: &OrchestratorSession,
        options: &DeployOptions,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<MaterializedProject> {
        let token = Uuid::new_v4().simple().to_string();
        let run_dir = options.workspace.join(format!(
            "{}-{}",
            sanitize_module_name(&session.stack_name()),
            &token[..8]
        ));
        let requested: PathBuf = run_dir.join(format!(
            "{}{}",
            session.project.assembly_name(),
            DEFAULT_DIR_SUFFIX
        ));

        let governor = SaveDirectoryGovernor::new(&NoProbe, &AssumeYes, &options.workspace)
            .without_advisory();
        let save_dir = governor.prepare(Some(&requested), &session.project)?;
        ProjectMaterializer::new()
            .materialize(rec, session, &save_dir, sink)
            .inspect_err(|_| {
                if let Some(root) = save_dir.created_root() {
                    if let Err(err) = LocalFs::new().remove_dir_all(root) {
                        warn!("failed to remove {}: {}", root.display(), err);
                    }
                }
            })
    }
}

fn new_record(
    session: &OrchestratorSession,
    rec: &Recommendation,
    application: &str,
    option_values: BTreeMap<String, Value>,
    status: DeploymentStatus,
    project: &MaterializedProject,
) -> DeploymentRecord {
    DeploymentRecord {
        project_path: session.project.project_path().to_path_buf(),
        profile: session.aws.profile.clone(),
        region: session.aws.region.clone(),
        application: CloudApplication::new(
            application,
            rec.recipe.id.clone(),
            rec.recipe.version.to_string(),
        ),
        option_values,
        status,
        output_dir: Some(project.directory.clone()),
        updated_at: Utc::now(),
    }
}
