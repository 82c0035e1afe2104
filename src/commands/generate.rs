//! Generate command handler

use std::path::{Path, PathBuf};

use anyhow::Result;

use stackwright::application::GenerateOptions;
use stackwright::presentation::factory;

use super::{parse_overrides, CommandContext};

pub fn cmd_generate(
    ctx: &CommandContext,
    project: &Path,
    output: Option<PathBuf>,
    recipe: Option<String>,
    set: &[String],
    yes: bool,
) -> Result<()> {
    let mut options = GenerateOptions::new().with_overrides(parse_overrides(set)?);
    if let Some(output) = output {
        options = options.with_output(output);
    }
    if let Some(recipe) = recipe {
        options = options.with_recipe(recipe);
    }

    let use_case =
        factory::create_generate_use_case(&ctx.recipes_paths, &ctx.config, ctx.interactive(), yes)?;
    let store = factory::create_settings_store()?;
    let session = ctx.session(project, &store)?;
    let sink = factory::create_event_sink(ctx.json, "generate", ctx.verbose);

    let result = use_case.execute(&session, &options, sink.as_ref())?;
    print!("{}", ctx.renderer().generated(&result));
    Ok(())
}
