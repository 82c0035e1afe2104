//! Deploy Module
//!
//! Generates a deployment project into the workspace and hands it off to the
//! external deploy tool.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stackwright::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(recipes, store, hints, tool, handoff);
//! let result = use_case.execute(&session, &DeployOptions::new(workspace), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::DeployUseCase;
