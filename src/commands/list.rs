//! List command handler

use anyhow::Result;

use stackwright::presentation::factory;

use super::CommandContext;

pub fn cmd_list(ctx: &CommandContext) -> Result<()> {
    let records = factory::create_list_use_case()?.execute()?;
    print!("{}", ctx.renderer().deployments(&records));
    Ok(())
}
