//! Planning pipeline
//!
//! Shared front half of `recommend`, `generate` and `deploy`:
//!
//! 1. Load the recipe catalog
//! 2. Rank applicable recipes for the project
//! 3. Select one recommendation (explicit id or the top ranked)
//! 4. Resolve its option settings from overrides, prior values and defaults

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::entities::{
    DeploymentRecord, OrchestratorSession, RecipeCatalog, Recommendation,
};
use crate::domain::policies::RuleContext;
use crate::domain::ports::{RecipeRepository, SettingsRepository, TypeHintRegistry};
use crate::domain::services::{generate_recommendations, SettingInputs, SettingsResolver};
use crate::error::{StackwrightError, StackwrightResult};

/// Ranked recommendations together with the catalog they came from
#[derive(Debug)]
pub struct RankedRecipes {
    pub catalog: RecipeCatalog,
    pub recommendations: Vec<Recommendation>,
}

/// A selected recommendation with every setting resolved
#[derive(Debug)]
pub struct PlannedDeployment {
    pub recommendation: Recommendation,
    /// Record found in the prior-settings store, if any
    pub prior: Option<DeploymentRecord>,
}

pub struct PlanningPipeline<'a> {
    recipes: &'a dyn RecipeRepository,
    store: &'a dyn SettingsRepository,
    hints: &'a TypeHintRegistry,
}

impl<'a> PlanningPipeline<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        store: &'a dyn SettingsRepository,
        hints: &'a TypeHintRegistry,
    ) -> Self {
        Self {
            recipes,
            store,
            hints,
        }
    }

    /// Load the catalog and rank the recipes that apply to the session's project
    pub fn recommend(&self, session: &OrchestratorSession) -> StackwrightResult<RankedRecipes> {
        let catalog = self.recipes.load_catalog()?;
        for warning in &catalog.warnings {
            warn!("{}", warning);
        }
        let recommendations =
            generate_recommendations(&session.project, &session.capabilities, &catalog)?;
        info!(
            project = %session.project.project_path().display(),
            count = recommendations.len(),
            "generated recommendations"
        );
        Ok(RankedRecipes {
            catalog,
            recommendations,
        })
    }

    /// Recommend, select and resolve in one go
    pub fn plan(
        &self,
        session: &OrchestratorSession,
        recipe_id: Option<&str>,
        overrides: &BTreeMap<String, String>,
    ) -> StackwrightResult<PlannedDeployment> {
        let ranked = self.recommend(session)?;
        let mut recommendation = select_recommendation(ranked, recipe_id, session)?;

        let prior = self.load_prior(session);
        let mut inputs = prior_inputs(
            prior.as_ref(),
            &session.stack_name(),
            &recommendation.recipe.id,
        );
        inputs.overrides = overrides.clone();

        SettingsResolver::new(session, self.hints).resolve_all(&mut recommendation, &inputs)?;
        Ok(PlannedDeployment {
            recommendation,
            prior,
        })
    }

    /// A corrupt or unreadable record is not fatal; resolution starts from defaults
    fn load_prior(&self, session: &OrchestratorSession) -> Option<DeploymentRecord> {
        match self.store.load(session.project.project_path()) {
            Ok(record) => record,
            Err(err) => {
                warn!("ignoring saved deployment settings: {}", err);
                None
            }
        }
    }
}

/// Pick the recommendation to materialize.
///
/// Without an id the top-ranked one wins. An id that exists in the catalog but
/// did not match the project is reported separately from an unknown id.
pub fn select_recommendation(
    ranked: RankedRecipes,
    recipe_id: Option<&str>,
    session: &OrchestratorSession,
) -> StackwrightResult<Recommendation> {
    let project_path = session.project.project_path().to_path_buf();
    let Some(id) = recipe_id else {
        return ranked
            .recommendations
            .into_iter()
            .next()
            .ok_or(StackwrightError::NoRecommendations {
                project: project_path,
            });
    };

    if let Some(rec) = ranked
        .recommendations
        .into_iter()
        .find(|rec| rec.recipe.id == id)
    {
        return Ok(rec);
    }

    match ranked.catalog.find(id) {
        Some(recipe) => {
            let ctx = RuleContext::new(&session.project, &session.capabilities);
            debug!(
                recipe = %recipe.id,
                matches = ctx.satisfies_all(&recipe.rules),
                "requested recipe was not recommended"
            );
            Err(StackwrightError::RecipeNotCompatible {
                id: id.to_string(),
                project: project_path,
            })
        }
        None => Err(StackwrightError::RecipeNotFound { id: id.to_string() }),
    }
}

/// Prior values apply only when the stored record is for the same
/// application and recipe.
pub fn prior_inputs(
    record: Option<&DeploymentRecord>,
    application: &str,
    recipe_id: &str,
) -> SettingInputs {
    let mut inputs = SettingInputs::default();
    if let Some(record) = record.filter(|r| r.applies_to(application, recipe_id)) {
        debug!(
            application,
            recipe = recipe_id,
            values = record.option_values.len(),
            "using saved option values"
        );
        inputs.prior = record.option_values.clone();
    }
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CloudApplication, ProjectDefinition, Recipe};
    use crate::domain::policies::Predicate;
    use crate::domain::value_objects::{DeploymentStatus, HostCapabilities};
    use chrono::Utc;
    use semver::Version;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn recipe(id: &str, priority: i32, rules: Vec<Predicate>) -> Recipe {
        Recipe {
            id: id.into(),
            version: Version::new(1, 0, 0),
            name: id.into(),
            description: String::new(),
            target_service: String::new(),
            priority,
            template: None,
            rules,
            option_settings: Vec::new(),
            source_path: PathBuf::new(),
        }
    }

    fn session() -> OrchestratorSession {
        OrchestratorSession::new(
            ProjectDefinition::for_file("/code/App/App.csproj"),
            HostCapabilities::new(),
        )
    }

    fn ranked(recipes: Vec<Recipe>) -> RankedRecipes {
        let catalog = RecipeCatalog::new(recipes);
        let session = session();
        let recommendations =
            generate_recommendations(&session.project, &session.capabilities, &catalog)
                .unwrap_or_default();
        RankedRecipes {
            catalog,
            recommendations,
        }
    }

    #[test]
    fn selects_top_ranked_without_id() {
        let ranked = ranked(vec![recipe("A", 10, vec![]), recipe("B", 20, vec![])]);
        let rec = select_recommendation(ranked, None, &session()).unwrap();
        assert_eq!(rec.recipe.id, "B");
    }

    #[test]
    fn selects_requested_recipe() {
        let ranked = ranked(vec![recipe("A", 10, vec![]), recipe("B", 20, vec![])]);
        let rec = select_recommendation(ranked, Some("A"), &session()).unwrap();
        assert_eq!(rec.recipe.id, "A");
    }

    #[test]
    fn distinguishes_incompatible_from_unknown() {
        let docker_only = recipe(
            "Docker",
            5,
            vec![Predicate::Capability {
                name: "docker".into(),
            }],
        );
        let ranked_once = ranked(vec![recipe("A", 10, vec![]), docker_only.clone()]);
        let err = select_recommendation(ranked_once, Some("Docker"), &session()).unwrap_err();
        assert!(matches!(err, StackwrightError::RecipeNotCompatible { .. }));

        let ranked_again = ranked(vec![recipe("A", 10, vec![]), docker_only]);
        let err = select_recommendation(ranked_again, Some("Nope"), &session()).unwrap_err();
        assert!(matches!(err, StackwrightError::RecipeNotFound { .. }));
    }

    #[test]
    fn prior_values_require_same_application_and_recipe() {
        let record = DeploymentRecord {
            project_path: PathBuf::from("/code/App/App.csproj"),
            profile: None,
            region: None,
            application: CloudApplication::new("web", "A", "1.0.0"),
            option_values: [("Port".to_string(), json!(8080))].into(),
            status: DeploymentStatus::Succeeded,
            output_dir: None,
            updated_at: Utc::now(),
        };
        assert_eq!(
            prior_inputs(Some(&record), "web", "A").prior.get("Port"),
            Some(&json!(8080))
        );
        assert!(prior_inputs(Some(&record), "web", "B").prior.is_empty());
        assert!(prior_inputs(Some(&record), "api", "A").prior.is_empty());
        assert!(prior_inputs(None, "web", "A").prior.is_empty());
    }

    #[test]
    fn ranked_recommendations_share_catalog_recipes() {
        let ranked = ranked(vec![recipe("A", 10, vec![])]);
        let first = &ranked.recommendations[0];
        assert!(Arc::ptr_eq(&first.recipe, &ranked.catalog.recipes[0]));
    }
}
