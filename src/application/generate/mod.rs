//! Generate Module
//!
//! Materializes a deployment project for the best (or requested) recipe.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`GenerateOptions`)
//! - `result` - Result types (`GenerateResult`)
//! - `use_case` - Core use case logic (`GenerateUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stackwright::application::generate::{GenerateOptions, GenerateUseCase};
//!
//! let use_case = GenerateUseCase::new(recipes, store, hints, probe, confirmer, cwd);
//! let result = use_case.execute(&session, &GenerateOptions::new(), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::GenerateResult;
pub use use_case::GenerateUseCase;
