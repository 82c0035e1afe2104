//! Generate Options

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options for the generate use case
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Save directory; a sibling of the project directory when unset
    pub output: Option<PathBuf>,
    /// Recipe to use instead of the top-ranked recommendation
    pub recipe_id: Option<String>,
    /// Raw `KEY=VALUE` option overrides
    pub overrides: BTreeMap<String, String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
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
