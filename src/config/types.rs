//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::HandoffSettings;
use crate::error::StackwrightResult;

use super::loader::{self, ConfigWarning};

/// Recipe catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecipesConfig {
    /// Extra search paths, searched after `--recipes-path` and before the
    /// built-in `~/.stackwright/recipes`
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// Handoff tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployConfig {
    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default = "default_true")]
    pub bootstrap: bool,

    #[serde(default = "default_execution_env_key")]
    pub execution_env_key: String,

    #[serde(default = "default_settings_context_key")]
    pub settings_context_key: String,

    /// Per-step timeout; unset waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Where `deploy` generates projects (default `~/.stackwright/projects`)
    #[serde(default)]
    pub workspace: Option<PathBuf>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            bootstrap: true,
            execution_env_key: default_execution_env_key(),
            settings_context_key: default_settings_context_key(),
            timeout_secs: None,
            workspace: None,
        }
    }
}

impl DeployConfig {
    pub fn handoff_settings(&self) -> HandoffSettings {
        HandoffSettings {
            program: self.tool.clone(),
            bootstrap: self.bootstrap,
            execution_env_key: self.execution_env_key.clone(),
            settings_context_key: self.settings_context_key.clone(),
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

fn default_tool() -> String {
    "cdk".to_string()
}

fn default_execution_env_key() -> String {
    "AWS_EXECUTION_ENV".to_string()
}

fn default_settings_context_key() -> String {
    "StackwrightSettingsPath".to_string()
}

fn default_true() -> bool {
    true
}

/// Resource query configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourcesConfig {
    /// JSON inventory answering type-hint lookups
    #[serde(default)]
    pub inventory: Option<PathBuf>,

    /// Retries for transient query failures
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            inventory: None,
            retries: default_retries(),
        }
    }
}

fn default_retries() -> u32 {
    2
}

/// Target account and region
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AwsConfig {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub const NAMES: &'static [&'static str] = &["quiet", "normal", "verbose", "debug"];

    /// Case-insensitive lookup by config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }

    /// Default tracing filter directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub recipes: RecipesConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StackwrightResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StackwrightResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// User config, overlaid section by section with the project config,
    /// then environment overrides.
    pub fn load_layered(
        project_dir: Option<&Path>,
        explicit: Option<&Path>,
    ) -> StackwrightResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(project_dir, explicit)
    }
}
