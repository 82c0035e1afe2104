//! RecipeRepository port - abstraction for loading the recipe catalog

use crate::domain::entities::RecipeCatalog;
use crate::error::StackwrightResult;

/// Source of recipe definitions.
///
/// Malformed definitions are reported in `RecipeCatalog::warnings`; a catalog
/// with zero recipes is an error.
pub trait RecipeRepository: Send + Sync {
    fn load_catalog(&self) -> StackwrightResult<RecipeCatalog>;
}
