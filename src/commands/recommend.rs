//! Recommend command handler

use std::path::Path;

use anyhow::Result;

use stackwright::application::PlanningPipeline;
use stackwright::domain::ports::TypeHintRegistry;
use stackwright::presentation::factory;

use super::CommandContext;

pub fn cmd_recommend(ctx: &CommandContext, project: &Path) -> Result<()> {
    let store = factory::create_settings_store()?;
    let session = ctx.session(project, &store)?;
    let recipes = factory::create_recipe_repository(&ctx.recipes_paths, &ctx.config);

    // Ranking never resolves settings, so no type hints are needed
    let hints = TypeHintRegistry::new();
    let ranked = PlanningPipeline::new(&recipes, &store, &hints).recommend(&session)?;
    print!(
        "{}",
        ctx.renderer()
            .recommendations(&session, &ranked.recommendations)
    );
    Ok(())
}
