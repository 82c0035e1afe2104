//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod recipe;
mod settings;

pub use recipe::{FsRecipeRepository, RECIPE_EXTENSION};
pub use settings::{store_key, JsonSettingsRepository};
