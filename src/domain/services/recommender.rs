//! Recommendation engine
//!
//! Evaluates every recipe's applicability rules against the project and host
//! capabilities, then ranks the qualifying recipes. Recipes are independent,
//! so evaluation runs in parallel; ranking happens after the join.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::entities::{ProjectDefinition, RecipeCatalog, Recommendation};
use crate::domain::policies::RuleContext;
use crate::domain::value_objects::HostCapabilities;
use crate::error::{StackwrightError, StackwrightResult};

/// Applicable recipes, best first.
///
/// Never returns an empty list: no match is `NoRecommendations`.
pub fn generate_recommendations(
    project: &ProjectDefinition,
    capabilities: &HostCapabilities,
    catalog: &RecipeCatalog,
) -> StackwrightResult<Vec<Recommendation>> {
    let ctx = RuleContext::new(project, capabilities);

    let mut matches: Vec<Recommendation> = catalog
        .recipes
        .par_iter()
        .filter(|recipe| {
            let applies = ctx.satisfies_all(&recipe.rules);
            debug!(recipe = %recipe.id, applies, "evaluated recipe rules");
            applies
        })
        .map(|recipe| Recommendation::new(recipe.clone()))
        .collect();

    if matches.is_empty() {
        return Err(StackwrightError::NoRecommendations {
            project: project.project_path().to_path_buf(),
        });
    }

    matches.sort_by(rank);
    Ok(matches)
}

/// Priority descending, then name ascending (ordinal). Id and version keep
/// the order total for recipes that share a display name.
fn rank(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.recipe.name.cmp(&b.recipe.name))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
        .then_with(|| b.recipe.version.cmp(&a.recipe.version))
}
