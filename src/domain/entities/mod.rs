//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `ProjectDefinition` - Analyzed metadata of the application being deployed
//! - `Recipe` - A versioned deployment blueprint loaded from the catalog
//! - `Recommendation` - A recipe judged applicable, plus its resolved settings
//! - `OrchestratorSession` - Per-invocation context shared by every component
//! - `CloudApplication` / `DeploymentRecord` - Identity and persisted state of a deployment

mod cloud_application;
mod project;
mod recipe;
mod recommendation;
mod session;

pub use cloud_application::{CloudApplication, DeploymentRecord};
pub use project::{parse_runtime_version, ProjectDefinition};
pub use recipe::{DependsOn, OptionSettingItem, Recipe, RecipeCatalog, RecipeTemplate};
pub use recommendation::{Recommendation, SettingState};
pub use session::{AwsContext, CredentialHandle, OrchestratorSession};
