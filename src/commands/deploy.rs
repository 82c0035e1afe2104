//! Deploy command handler

use std::path::Path;

use anyhow::Result;

use stackwright::application::DeployOptions;
use stackwright::domain::ports::Confirmer;
use stackwright::error::StackwrightError;
use stackwright::infrastructure::prompts::DialoguerConfirmer;
use stackwright::presentation::factory;

use super::{parse_overrides, CommandContext};

pub fn cmd_deploy(
    ctx: &CommandContext,
    project: &Path,
    name: Option<String>,
    recipe: Option<String>,
    set: &[String],
    yes: bool,
) -> Result<()> {
    let mut options = DeployOptions::new(factory::deploy_workspace(&ctx.config)?)
        .with_overrides(parse_overrides(set)?);
    if let Some(recipe) = recipe {
        options = options.with_recipe(recipe);
    }

    let store = factory::create_settings_store()?;
    let mut session = ctx.session(project, &store)?;
    if let Some(name) = name {
        session = session.with_application_name(name);
    }

    // Unattended runs (no terminal, --json) proceed without asking
    if !yes && ctx.interactive() {
        let prompt = format!(
            "Deploy {} as '{}' with profile {}?",
            session.project.project_path().display(),
            session.stack_name(),
            session.aws.profile.as_deref().unwrap_or("(none)")
        );
        if !DialoguerConfirmer.confirm(&prompt, true) {
            return Err(StackwrightError::Aborted.into());
        }
    }

    let use_case = factory::create_deploy_use_case(
        &ctx.recipes_paths,
        &ctx.config,
        ctx.interactive(),
        ctx.cancel.clone(),
    )?;
    let sink = factory::create_event_sink(ctx.json, "deploy", ctx.verbose);

    let result = use_case.execute(&session, &options, sink.as_ref())?;
    print!("{}", ctx.renderer().deployed(&result));
    Ok(())
}
