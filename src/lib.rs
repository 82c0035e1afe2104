//! Stackwright - recipe-driven deployment planner
//!
//! Stackwright inspects an application project, recommends deployment recipes
//! that apply to it, resolves each recipe's option settings, materializes a
//! self-contained infrastructure project and hands it to an external
//! deployment tool.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use domain::entities::{
    OrchestratorSession, ProjectDefinition, Recipe, RecipeCatalog, Recommendation,
};
pub use error::{ErrorClass, StackwrightError, StackwrightResult};
