//! Configuration loading and layering

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::{stackwright_home_dir, STACKWRIGHT_TEST_HOME_VAR};

use super::suggest::closest_match;
use super::types::{Config, Verbosity};

/// Project config location relative to the project directory
pub const PROJECT_CONFIG_PATH: &str = ".stackwright/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A key no config section knows about
    UnknownKey {
        key: String,
        file: PathBuf,
        line: Option<usize>,
        suggestion: Option<String>,
    },
    /// An environment override that does not parse; the layered value stays
    InvalidEnvValue {
        var: &'static str,
        value: String,
        expected: String,
        suggestion: Option<String>,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::UnknownKey {
                key,
                file,
                line,
                suggestion,
            } => {
                write!(f, "unknown config key '{}' in {}", key, file.display())?;
                if let Some(line) = line {
                    write!(f, ":{}", line)?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{}'?)", suggestion)?;
                }
            }
            ConfigWarning::InvalidEnvValue {
                var,
                value,
                expected,
                suggestion,
            } => {
                write!(f, "ignoring {}='{}': expected {}", var, value, expected)?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{}'?)", suggestion)?;
                }
            }
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StackwrightResult<(Config, Vec<ConfigWarning>)> {
    let (config, _table, warnings) = parse_file(path)?;
    Ok((config, warnings))
}

fn parse_file(path: &Path) -> StackwrightResult<(Config, toml::Table, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| StackwrightError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let invalid = |message: String| StackwrightError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    };

    let table: toml::Table = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                line: find_line_number(&content, &key),
                suggestion: closest_match(&key, CONFIG_KEYS).map(str::to_string),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, table, warnings))
}

/// Build the effective configuration.
///
/// An explicit `--config` file replaces both the user and project files.
/// Otherwise the user file is loaded and every top-level section present in
/// the project file replaces the user's section as a whole.
pub fn load_layered(
    project_dir: Option<&Path>,
    explicit: Option<&Path>,
) -> StackwrightResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        let (config, mut warnings) = load_with_warnings(path)?;
        let (config, env_warnings) = with_env_overrides(config, env_lookup);
        warnings.extend(env_warnings);
        return Ok((config, warnings));
    }

    let mut config = Config::default();
    let mut warnings = Vec::new();

    if let Some(user) = user_config_path().filter(|p| p.is_file()) {
        let (user_config, _table, user_warnings) = parse_file(&user)?;
        config = user_config;
        warnings.extend(user_warnings);
    }

    if let Some(project) = project_dir
        .map(|dir| dir.join(PROJECT_CONFIG_PATH))
        .filter(|p| p.is_file())
    {
        let (project_config, sections, project_warnings) = parse_file(&project)?;
        config = overlay_sections(config, project_config, &sections);
        warnings.extend(project_warnings);
    }

    let (config, env_warnings) = with_env_overrides(config, env_lookup);
    warnings.extend(env_warnings);
    Ok((config, warnings))
}

/// Replace each section of `base` that `sections` names with the one from
/// `overlay`.
pub fn overlay_sections(mut base: Config, overlay: Config, sections: &toml::Table) -> Config {
    if sections.contains_key("recipes") {
        base.recipes = overlay.recipes;
    }
    if sections.contains_key("deploy") {
        base.deploy = overlay.deploy;
    }
    if sections.contains_key("resources") {
        base.resources = overlay.resources;
    }
    if sections.contains_key("aws") {
        base.aws = overlay.aws;
    }
    if sections.contains_key("output") {
        base.output = overlay.output;
    }
    base
}

/// `~/.config/stackwright/config.toml` (the test home wins when set)
pub fn user_config_path() -> Option<PathBuf> {
    let base = if std::env::var_os(STACKWRIGHT_TEST_HOME_VAR).is_some() {
        stackwright_home_dir().map(|home| home.join(".config"))
    } else {
        dirs::config_dir()
    };
    base.map(|dir| dir.join("stackwright").join("config.toml"))
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Apply environment variable overrides (STACKWRIGHT_* prefix, plus the
/// standard AWS_PROFILE / AWS_REGION / AWS_ACCOUNT_ID).
///
/// Values that do not parse are reported and leave the layered value alone.
pub fn with_env_overrides(
    mut config: Config,
    env: impl Fn(&str) -> Option<String>,
) -> (Config, Vec<ConfigWarning>) {
    let set = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    let mut warnings = Vec::new();

    // STACKWRIGHT_RECIPES_PATH (platform path list)
    if let Some(paths) = set("STACKWRIGHT_RECIPES_PATH") {
        config.recipes.paths = std::env::split_paths(&paths).collect();
    }

    if let Some(tool) = set("STACKWRIGHT_DEPLOY_TOOL") {
        config.deploy.tool = tool;
    }

    if let Some(raw) = set("STACKWRIGHT_DEPLOY_BOOTSTRAP") {
        match parse_bool(&raw) {
            Some(bootstrap) => config.deploy.bootstrap = bootstrap,
            None => warnings.push(invalid_choice(
                "STACKWRIGHT_DEPLOY_BOOTSTRAP",
                &raw,
                &["true", "false"],
            )),
        }
    }

    if let Some(raw) = set("STACKWRIGHT_DEPLOY_TIMEOUT_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.deploy.timeout_secs = Some(secs),
            Err(_) => warnings.push(ConfigWarning::InvalidEnvValue {
                var: "STACKWRIGHT_DEPLOY_TIMEOUT_SECS",
                value: raw,
                expected: "a whole number of seconds".to_string(),
                suggestion: None,
            }),
        }
    }

    if let Some(workspace) = set("STACKWRIGHT_DEPLOY_WORKSPACE") {
        config.deploy.workspace = Some(PathBuf::from(workspace));
    }

    if let Some(inventory) = set("STACKWRIGHT_RESOURCES_INVENTORY") {
        config.resources.inventory = Some(PathBuf::from(inventory));
    }

    if let Some(raw) = set("STACKWRIGHT_VERBOSITY") {
        match Verbosity::from_name(&raw) {
            Some(verbosity) => config.output.verbosity = verbosity,
            None => warnings.push(invalid_choice(
                "STACKWRIGHT_VERBOSITY",
                &raw,
                Verbosity::NAMES,
            )),
        }
    }

    if let Some(profile) = set("AWS_PROFILE") {
        config.aws.profile = Some(profile);
    }
    if let Some(region) = set("AWS_REGION").or_else(|| set("AWS_DEFAULT_REGION")) {
        config.aws.region = Some(region);
    }
    if let Some(account) = set("AWS_ACCOUNT_ID") {
        config.aws.account = Some(account);
    }

    (config, warnings)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn invalid_choice(var: &'static str, raw: &str, choices: &[&'static str]) -> ConfigWarning {
    ConfigWarning::InvalidEnvValue {
        var,
        value: raw.to_string(),
        expected: format!("one of {}", choices.join(", ")),
        suggestion: closest_match(&raw.trim().to_lowercase(), choices).map(str::to_string),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

/// Every key the config sections accept, for typo suggestions
const CONFIG_KEYS: &[&str] = &[
    "recipes",
    "paths",
    "deploy",
    "tool",
    "bootstrap",
    "execution_env_key",
    "settings_context_key",
    "timeout_secs",
    "workspace",
    "resources",
    "inventory",
    "retries",
    "aws",
    "profile",
    "region",
    "account",
    "output",
    "verbosity",
];
