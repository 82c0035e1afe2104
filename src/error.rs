//! Error types for Stackwright
//!
//! Library code returns `StackwrightError`; the binary wraps it in `anyhow`
//! and maps the error class to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stackwright operations
pub type StackwrightResult<T> = Result<T, StackwrightError>;

/// How an error is reported to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Recoverable problem caused by input or project state
    User,
    /// Recipe catalog could not be loaded
    Loader,
    /// The handoff tool exited with a non-zero status
    Subprocess(i32),
    /// Unexpected failure; reported with full detail
    Defect,
}

/// Main error type for Stackwright operations
#[derive(Error, Debug)]
pub enum StackwrightError {
    /// Save directory failed validation (non-empty, nested in the project, ...)
    #[error("invalid deployment project directory {path}: {message}")]
    InvalidSaveDirectory { path: PathBuf, message: String },

    /// No recipe in the catalog applies to the project
    #[error("no deployment recommendations found for {project}")]
    NoRecommendations { project: PathBuf },

    /// An option setting value was rejected by a validator
    #[error("option setting '{setting_id}' failed validation: {reason}")]
    SettingValidationFailed { setting_id: String, reason: String },

    /// The resource query behind a type hint failed after retries
    #[error("option setting '{setting_id}' could not be resolved: {message}")]
    ResourceQueryFailed { setting_id: String, message: String },

    /// Settings are still unresolved or failed when materialization was requested
    #[error("option settings of recipe '{recipe_id}' are not resolved: {pending}")]
    SettingsUnresolved { recipe_id: String, pending: String },

    /// An override or re-resolution named a setting the recipe does not declare
    #[error("unknown option setting '{setting_id}' in recipe '{recipe_id}'")]
    UnknownSetting {
        setting_id: String,
        recipe_id: String,
    },

    /// `--set` input that is not `KEY=VALUE`
    #[error("invalid option override '{input}' - expected KEY=VALUE")]
    InvalidOverride { input: String },

    /// The requested recipe id is not in the catalog
    #[error("recipe '{id}' was not found in the recipe catalog")]
    RecipeNotFound { id: String },

    /// The requested recipe exists but does not apply to the project
    #[error("recipe '{id}' is not compatible with {project}")]
    RecipeNotCompatible { id: String, project: PathBuf },

    /// Project path does not exist
    #[error("project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// Handoff requested without a credential context
    #[error("no credentials available for the {step} step - pass --profile or set AWS_PROFILE")]
    MissingCredentials { step: String },

    /// User declined a confirmation
    #[error("operation aborted by user")]
    Aborted,

    /// A recipe search path is missing or unreadable
    #[error("recipe catalog path {path} is unreadable: {message}")]
    CatalogUnreadable { path: PathBuf, message: String },

    /// Search paths were readable but held no valid recipe
    #[error("no valid recipes found in {searched}")]
    NoRecipesFound { searched: String },

    /// Recipe definition is structurally invalid (cycles, missing template, ...)
    #[error("invalid recipe {file}: {message}")]
    InvalidRecipe { file: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Bootstrap or deploy step exited non-zero
    #[error("{step} step for recipe '{recipe}' failed with exit code {code}")]
    SubprocessFailed {
        step: String,
        recipe: String,
        code: i32,
    },

    /// Handoff tool could not be started or was interrupted
    #[error("{step} step for recipe '{recipe}' did not complete: {message}")]
    HandoffInterrupted {
        step: String,
        recipe: String,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Prior-settings store could not be read or written
    #[error("deployment store error: {0}")]
    Store(#[from] crate::domain::ports::SettingsStoreError),

    /// Invariant violation inside Stackwright itself
    #[error("internal error: {0}")]
    Defect(String),
}

impl StackwrightError {
    /// Classify the error for exit code selection
    pub fn class(&self) -> ErrorClass {
        match self {
            StackwrightError::CatalogUnreadable { .. }
            | StackwrightError::NoRecipesFound { .. }
            | StackwrightError::InvalidRecipe { .. } => ErrorClass::Loader,
            StackwrightError::SubprocessFailed { code, .. } => ErrorClass::Subprocess(*code),
            StackwrightError::Io(_)
            | StackwrightError::Json(_)
            | StackwrightError::Store(_)
            | StackwrightError::Defect(_) => ErrorClass::Defect,
            _ => ErrorClass::User,
        }
    }

    /// Path associated with the error, if any (used for error rendering)
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StackwrightError::InvalidSaveDirectory { path, .. }
            | StackwrightError::CatalogUnreadable { path, .. }
            | StackwrightError::ProjectNotFound { path }
            | StackwrightError::InvalidConfig { file: path, .. }
            | StackwrightError::InvalidRecipe { file: path, .. } => Some(path),
            StackwrightError::NoRecommendations { project }
            | StackwrightError::RecipeNotCompatible { project, .. } => Some(project),
            _ => None,
        }
    }
}
