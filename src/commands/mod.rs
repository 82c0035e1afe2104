//! Command handlers
//!
//! Each handler wires use cases through the presentation factory, runs them
//! and renders the result. Errors bubble up as `anyhow::Error`; `main` maps
//! them to exit codes.

mod deploy;
mod generate;
mod list;
mod overrides;
mod recommend;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use is_terminal::IsTerminal;

use stackwright::config::Config;
use stackwright::domain::entities::OrchestratorSession;
use stackwright::domain::ports::SettingsRepository;
use stackwright::presentation::factory;
use stackwright::presentation::{AwsArgs, Cli, OutputFormat, Renderer};

pub use deploy::cmd_deploy;
pub use generate::cmd_generate;
pub use list::cmd_list;
pub use overrides::parse_overrides;
pub use recommend::cmd_recommend;

/// Everything a handler needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub verbose: u8,
    pub recipes_paths: Vec<PathBuf>,
    pub capabilities: Vec<String>,
    pub aws: AwsArgs,
    pub cancel: Arc<AtomicBool>,
}

impl CommandContext {
    pub fn new(cli: &Cli, config: Config, cancel: Arc<AtomicBool>) -> Self {
        Self {
            config,
            json: cli.json,
            verbose: cli.verbose,
            recipes_paths: cli.recipes_paths.clone(),
            capabilities: cli.capabilities.clone(),
            aws: cli.aws.clone(),
            cancel,
        }
    }

    pub fn interactive(&self) -> bool {
        factory::is_interactive(self.json)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(
            OutputFormat::from_json_flag(self.json),
            std::io::stdout().is_terminal() && !cfg!(windows),
        )
    }

    pub fn session(
        &self,
        project: &Path,
        store: &dyn SettingsRepository,
    ) -> Result<OrchestratorSession> {
        Ok(factory::create_session(
            project,
            &self.capabilities,
            &self.aws,
            &self.config,
            store,
        )?)
    }
}
