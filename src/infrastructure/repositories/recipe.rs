//! Filesystem recipe repository
//!
//! Walks each search path for `*.recipe` files and parses them as JSON.
//! A malformed file is skipped with a warning; a missing search path or a
//! catalog with no valid recipe at all is a loader error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::entities::{Recipe, RecipeCatalog};
use crate::domain::ports::{FileSystem, FsError, RecipeRepository};
use crate::domain::services::dependency_order;
use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::LocalFs;

/// Extension of recipe definition files
pub const RECIPE_EXTENSION: &str = "recipe";

pub struct FsRecipeRepository<F: FileSystem = LocalFs> {
    search_paths: Vec<PathBuf>,
    fs: F,
}

impl FsRecipeRepository<LocalFs> {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self::with_fs(search_paths, LocalFs::new())
    }
}

impl<F: FileSystem> FsRecipeRepository<F> {
    pub fn with_fs(search_paths: Vec<PathBuf>, fs: F) -> Self {
        Self { search_paths, fs }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn recipe_files(&self, root: &Path) -> StackwrightResult<Vec<PathBuf>> {
        if !self.fs.exists(root) {
            return Err(StackwrightError::CatalogUnreadable {
                path: root.to_path_buf(),
                message: "path does not exist".to_string(),
            });
        }
        if !self.fs.is_dir(root) {
            return Ok(if is_recipe_file(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let files = self
            .fs
            .list_files_recursive(root)
            .map_err(|e| StackwrightError::CatalogUnreadable {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(files.into_iter().filter(|p| is_recipe_file(p)).collect())
    }

    fn parse_recipe(&self, path: &Path) -> Result<Recipe, String> {
        let content = self.fs.read(path).map_err(|e: FsError| e.to_string())?;
        let mut recipe: Recipe = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        recipe.source_path = path.to_path_buf();

        dependency_order(&recipe).map_err(|e| match e {
            StackwrightError::InvalidRecipe { message, .. } => message,
            other => other.to_string(),
        })?;

        if let Some(template_dir) = recipe.template_dir() {
            if !self.fs.is_dir(&template_dir) {
                return Err(format!(
                    "template directory {} does not exist",
                    template_dir.display()
                ));
            }
        }
        Ok(recipe)
    }
}

impl<F: FileSystem> RecipeRepository for FsRecipeRepository<F> {
    fn load_catalog(&self) -> StackwrightResult<RecipeCatalog> {
        let mut catalog = RecipeCatalog::default();
        let mut seen = HashSet::new();

        for root in &self.search_paths {
            for file in self.recipe_files(root)? {
                match self.parse_recipe(&file) {
                    Ok(recipe) => {
                        if seen.insert(recipe.key()) {
                            debug!(recipe = %recipe.id, version = %recipe.version, file = %file.display(), "loaded recipe");
                            catalog.recipes.push(recipe.into());
                        } else {
                            let message = format!(
                                "skipping duplicate recipe {} {} in {}",
                                recipe.id,
                                recipe.version,
                                file.display()
                            );
                            warn!("{}", message);
                            catalog.warnings.push(message);
                        }
                    }
                    Err(reason) => {
                        let message =
                            format!("skipping malformed recipe {}: {}", file.display(), reason);
                        warn!("{}", message);
                        catalog.warnings.push(message);
                    }
                }
            }
        }

        if catalog.is_empty() {
            let searched = if self.search_paths.is_empty() {
                "(no recipe paths configured)".to_string()
            } else {
                self.search_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            return Err(StackwrightError::NoRecipesFound { searched });
        }
        Ok(catalog)
    }
}

fn is_recipe_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RECIPE_EXTENSION))
}
