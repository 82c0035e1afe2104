//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use is_terminal::IsTerminal;
use tracing::{debug, warn};

use crate::application::{DeployUseCase, GenerateUseCase, ListUseCase};
use crate::config::Config;
use crate::domain::entities::{AwsContext, CredentialHandle, OrchestratorSession};
use crate::domain::ports::{
    AssumeNo, AssumeYes, Confirmer, DeployEventSink, ResourcePicker, SettingsRepository,
    TypeHintRegistry,
};
use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::data_dir;
use crate::infrastructure::prompts::{DialoguerConfirmer, DialoguerPicker, UnattendedPicker};
use crate::infrastructure::resources::{InventoryResourceQuery, RetryingResourceQuery};
use crate::infrastructure::{
    default_type_hints, detect_capabilities, ConsoleEventSink, FsRecipeRepository, GitProbe,
    JsonEventSink, JsonSettingsRepository, ProcessTool, ProjectAnalyzer,
};

use super::cli::AwsArgs;

/// Type alias for the concrete GenerateUseCase with all dependencies
pub type ConcreteGenerateUseCase = GenerateUseCase<FsRecipeRepository, JsonSettingsRepository>;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<FsRecipeRepository, JsonSettingsRepository>;

/// Type alias for the concrete ListUseCase
pub type ConcreteListUseCase = ListUseCase<JsonSettingsRepository>;

const RESOURCE_QUERY_BACKOFF: Duration = Duration::from_millis(500);

/// Whether prompts can be shown: a terminal on stdin and no `--json`
pub fn is_interactive(json: bool) -> bool {
    !json && std::io::stdin().is_terminal()
}

/// Recipe search order: `--recipes-path`, then `[recipes] paths`, then
/// `~/.stackwright/recipes` when it exists.
pub fn recipe_search_paths(cli_paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = cli_paths.to_vec();
    paths.extend(config.recipes.paths.iter().cloned());
    if let Some(builtin) = data_dir().map(|dir| dir.join("recipes")) {
        if builtin.is_dir() && !paths.contains(&builtin) {
            paths.push(builtin);
        }
    }
    paths
}

pub fn create_recipe_repository(cli_paths: &[PathBuf], config: &Config) -> FsRecipeRepository {
    let paths = recipe_search_paths(cli_paths, config);
    debug!(paths = ?paths, "recipe search paths");
    FsRecipeRepository::new(paths)
}

/// `~/.stackwright/deployments`
pub fn create_settings_store() -> StackwrightResult<JsonSettingsRepository> {
    let root = data_dir()
        .ok_or_else(|| StackwrightError::Defect("home directory could not be resolved".into()))?
        .join("deployments");
    Ok(JsonSettingsRepository::new(root))
}

/// Built-in type hints backed by the configured inventory
pub fn create_type_hints(config: &Config, interactive: bool) -> TypeHintRegistry {
    let query = RetryingResourceQuery::new(
        InventoryResourceQuery::new(config.resources.inventory.clone()),
        config.resources.retries,
        RESOURCE_QUERY_BACKOFF,
    );
    let picker: Arc<dyn ResourcePicker> = if interactive {
        Arc::new(DialoguerPicker)
    } else {
        Arc::new(UnattendedPicker)
    };
    default_type_hints(Arc::new(query), picker)
}

/// `--yes` always confirms; without a terminal nothing is confirmed
pub fn create_confirmer(yes: bool, interactive: bool) -> Arc<dyn Confirmer> {
    if yes {
        Arc::new(AssumeYes)
    } else if interactive {
        Arc::new(DialoguerConfirmer)
    } else {
        Arc::new(AssumeNo)
    }
}

pub fn create_event_sink(json: bool, command: &'static str, verbose: u8) -> Box<dyn DeployEventSink> {
    if json {
        Box::new(JsonEventSink::stdout(command))
    } else {
        Box::new(ConsoleEventSink::stderr(verbose > 0))
    }
}

/// Flags > config and environment > the project's prior deployment
pub fn resolve_aws_context(
    flags: &AwsArgs,
    config: &Config,
    prior_profile: Option<&str>,
    prior_region: Option<&str>,
) -> AwsContext {
    AwsContext {
        profile: flags
            .profile
            .clone()
            .or_else(|| config.aws.profile.clone())
            .or_else(|| prior_profile.map(str::to_string)),
        region: flags
            .region
            .clone()
            .or_else(|| config.aws.region.clone())
            .or_else(|| prior_region.map(str::to_string)),
        account: flags.account.clone().or_else(|| config.aws.account.clone()),
    }
}

/// Analyze the project and assemble the per-invocation session
pub fn create_session(
    project: &Path,
    declared_capabilities: &[String],
    flags: &AwsArgs,
    config: &Config,
    store: &dyn SettingsRepository,
) -> StackwrightResult<OrchestratorSession> {
    let definition = ProjectAnalyzer::new().analyze(project)?;

    let mut capabilities = detect_capabilities(std::env::var_os("PATH").as_deref());
    for name in declared_capabilities {
        capabilities.insert(name);
    }

    let prior = match store.load(definition.project_path()) {
        Ok(prior) => prior,
        Err(err) => {
            warn!("ignoring unreadable deployment record: {}", err);
            None
        }
    };
    let aws = resolve_aws_context(
        flags,
        config,
        prior.as_ref().and_then(|r| r.profile.as_deref()),
        prior.as_ref().and_then(|r| r.region.as_deref()),
    );
    let credentials = aws.profile.clone().map(CredentialHandle::new);

    Ok(OrchestratorSession::new(definition, capabilities)
        .with_aws(aws)
        .with_credentials(credentials))
}

/// Create a generate use case with all dependencies wired up
pub fn create_generate_use_case(
    cli_paths: &[PathBuf],
    config: &Config,
    interactive: bool,
    yes: bool,
) -> StackwrightResult<ConcreteGenerateUseCase> {
    let cwd = std::env::current_dir()?;
    Ok(GenerateUseCase::new(
        create_recipe_repository(cli_paths, config),
        create_settings_store()?,
        create_type_hints(config, interactive),
        Arc::new(GitProbe::new()),
        create_confirmer(yes, interactive),
        cwd,
    ))
}

/// Create a deploy use case with all dependencies wired up
///
/// `cancel` is the flag set by the Ctrl-C handler.
pub fn create_deploy_use_case(
    cli_paths: &[PathBuf],
    config: &Config,
    interactive: bool,
    cancel: Arc<AtomicBool>,
) -> StackwrightResult<ConcreteDeployUseCase> {
    Ok(DeployUseCase::new(
        create_recipe_repository(cli_paths, config),
        create_settings_store()?,
        create_type_hints(config, interactive),
        Box::new(ProcessTool::new(cancel)),
        config.deploy.handoff_settings(),
    ))
}

pub fn create_list_use_case() -> StackwrightResult<ConcreteListUseCase> {
    Ok(ListUseCase::new(create_settings_store()?))
}

/// Root under which `deploy` generates projects
pub fn deploy_workspace(config: &Config) -> StackwrightResult<PathBuf> {
    match &config.deploy.workspace {
        Some(workspace) => Ok(workspace.clone()),
        None => data_dir()
            .map(|dir| dir.join("projects"))
            .ok_or_else(|| StackwrightError::Defect("home directory could not be resolved".into())),
    }
}
