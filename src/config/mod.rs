//! Configuration module for Stackwright
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STACKWRIGHT_*, AWS_PROFILE/AWS_REGION/AWS_ACCOUNT_ID)
//! 3. Project config (<project>/.stackwright/config.toml), per section
//! 4. User config (~/.config/stackwright/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod suggest;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_PATH};
pub use types::{
    AwsConfig, Config, DeployConfig, OutputConfig, RecipesConfig, ResourcesConfig, Verbosity,
};
