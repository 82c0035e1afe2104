//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - Recommend, resolve, prepare the save directory, materialize
//! - `DeployUseCase` - Generate into the workspace, hand off, record the outcome
//! - `ListUseCase` - Persisted deployments
//!
//! ## Building blocks
//!
//! - `PlanningPipeline` - Catalog, ranking, selection and settings resolution
//! - `SaveDirectoryGovernor` - Save directory choice, validation and rollback
//! - `ProjectMaterializer` - Template rendering, settings payload, recipe snapshot
//! - `HandoffOrchestrator` - Bootstrap and deploy subprocess steps

pub mod deploy;
pub mod generate;
pub mod handoff;
pub mod list;
pub mod materialize;
pub mod pipeline;
pub mod save_directory;

#[cfg(test)]
pub(crate) mod testing;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use generate::{GenerateOptions, GenerateResult, GenerateUseCase};
pub use handoff::{HandoffOrchestrator, HandoffSettings};
pub use list::ListUseCase;
pub use materialize::{MaterializedProject, ProjectMaterializer, SETTINGS_FILE_NAME};
pub use pipeline::{PlannedDeployment, PlanningPipeline, RankedRecipes};
pub use save_directory::SaveDirectoryGovernor;
