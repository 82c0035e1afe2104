//! Generate Use Case
//!
//! Orchestrates the generate flow:
//! 1. Recommend, select and resolve (see `PlanningPipeline`)
//! 2. Prepare the save directory (rollback on failure)
//! 3. Materialize the deployment project
//!
//! Nothing here decides anything on its own; rules live in the domain services.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::materialize::ProjectMaterializer;
use crate::application::pipeline::PlanningPipeline;
use crate::application::save_directory::SaveDirectoryGovernor;
use crate::domain::entities::OrchestratorSession;
use crate::domain::ports::{
    Confirmer, DeployEvent, DeployEventSink, FileSystem, RecipeRepository, SettingsRepository,
    SourceControlProbe, TypeHintRegistry,
};
use crate::domain::value_objects::DeploymentStatus;
use crate::error::StackwrightResult;
use crate::infrastructure::fs::LocalFs;

use super::options::GenerateOptions;
use super::result::GenerateResult;

/// Generate use case - turns a project into a deployment project on disk
pub struct GenerateUseCase<R, S>
where
    R: RecipeRepository,
    S: SettingsRepository,
{
    recipes: R,
    store: S,
    hints: TypeHintRegistry,
    probe: Arc<dyn SourceControlProbe>,
    confirmer: Arc<dyn Confirmer>,
    cwd: PathBuf,
}

impl<R, S> GenerateUseCase<R, S>
where
    R: RecipeRepository,
    S: SettingsRepository,
{
    pub fn new(
        recipes: R,
        store: S,
        hints: TypeHintRegistry,
        probe: Arc<dyn SourceControlProbe>,
        confirmer: Arc<dyn Confirmer>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            recipes,
            store,
            hints,
            probe,
            confirmer,
            cwd: cwd.into(),
        }
    }

    pub fn execute(
        &self,
        session: &OrchestratorSession,
        options: &GenerateOptions,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<GenerateResult> {
        let pipeline = PlanningPipeline::new(&self.recipes, &self.store, &self.hints);
        let planned = pipeline.plan(session, options.recipe_id.as_deref(), &options.overrides)?;
        let rec = planned.recommendation;

        let governor =
            SaveDirectoryGovernor::new(self.probe.as_ref(), self.confirmer.as_ref(), &self.cwd);
        let save_dir = governor.prepare(options.output.as_deref(), &session.project)?;

        let project = match ProjectMaterializer::new().materialize(&rec, session, &save_dir, sink) {
            Ok(project) => project,
            Err(err) => {
                // Never leave a half-rendered project in a directory we made
                if let Some(root) = save_dir.created_root() {
                    if let Err(cleanup) = LocalFs::new().remove_dir_all(root) {
                        warn!("failed to remove {}: {}", root.display(), cleanup);
                    }
                }
                return Err(err);
            }
        };

        info!(
            recipe = %rec.recipe.id,
            destination = %project.directory.display(),
            "generated deployment project"
        );
        sink.on_event(DeployEvent::Completed {
            destination: project.directory.clone(),
            status: DeploymentStatus::Pending,
        });

        Ok(GenerateResult {
            recipe_id: rec.recipe.id.clone(),
            recipe_version: rec.recipe.version.to_string(),
            recipe_name: rec.recipe.name.clone(),
            created: save_dir.created(),
            project,
            settings: rec.settings,
        })
    }
}
