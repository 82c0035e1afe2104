//! Deploy Options

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Directory under which a fresh deployment project is generated
    /// (normally `~/.stackwright/projects`)
    pub workspace: PathBuf,
    /// Recipe to use instead of the top-ranked recommendation
    pub recipe_id: Option<String>,
    /// Raw `KEY=VALUE` option overrides
    pub overrides: BTreeMap<String, String>,
}

impl DeployOptions {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            recipe_id: None,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_recipe(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipe_id = Some(recipe_id.into());
        self
    }

    pub fn with_override(mut self, id: impl Into<String>, raw: impl Into<String>) -> Self {
        self.overrides.insert(id.into(), raw.into());
        self
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }
}
