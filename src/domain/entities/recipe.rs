//! Recipe entity
//!
//! A recipe is a versioned deployment blueprint: applicability rules, a schema
//! of option settings, and a template directory that is rendered into a
//! deployment project. Recipes are loaded once per invocation and never
//! mutated afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::policies::{Predicate, Validator};
use crate::domain::value_objects::OptionSettingValueType;

/// Deployment recipe as parsed from a `.recipe` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipe {
    pub id: String,
    pub version: Version,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_service: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<RecipeTemplate>,
    #[serde(default)]
    pub rules: Vec<Predicate>,
    #[serde(default)]
    pub option_settings: Vec<OptionSettingItem>,
    /// File the recipe was loaded from (not part of the file format)
    #[serde(skip)]
    pub source_path: PathBuf,
}

impl Recipe {
    /// Value for the execution-context environment variable: `<id>_<version>`
    pub fn execution_environment(&self) -> String {
        format!("{}_{}", self.id, self.version)
    }

    pub fn setting(&self, id: &str) -> Option<&OptionSettingItem> {
        self.option_settings.iter().find(|s| s.id == id)
    }

    /// Template directory resolved against the recipe file's directory
    pub fn template_dir(&self) -> Option<PathBuf> {
        let template = self.template.as_ref()?;
        if template.directory.is_absolute() {
            return Some(template.directory.clone());
        }
        let base = self.source_path.parent().unwrap_or_else(|| Path::new("."));
        Some(base.join(&template.directory))
    }

    /// `(id, version)` identity used for de-duplication
    pub fn key(&self) -> (String, Version) {
        (self.id.clone(), self.version.clone())
    }
}

/// Template set of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeTemplate {
    pub directory: PathBuf,
    /// Placeholder replaced by the module name in file names and contents
    pub token: String,
}

/// One configurable setting of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSettingItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Type", default)]
    pub value_type: OptionSettingValueType,
    #[serde(default)]
    pub default_value: Value,
    #[serde(default)]
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub depends_on: Vec<DependsOn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    #[serde(default)]
    pub advanced: bool,
    /// An unset type-hint selection is acceptable
    #[serde(default)]
    pub allow_empty: bool,
}

impl OptionSettingItem {
    pub fn new(id: impl Into<String>, value_type: OptionSettingValueType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            value_type,
            default_value: Value::Null,
            validators: Vec::new(),
            depends_on: Vec::new(),
            type_hint: None,
            advanced: false,
            allow_empty: false,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn depending_on(mut self, id: impl Into<String>, value: Value) -> Self {
        self.depends_on.push(DependsOn {
            id: id.into(),
            value,
        });
        self
    }

    pub fn with_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.type_hint = Some(hint.into());
        self
    }

    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Visibility condition: the named setting must currently equal `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DependsOn {
    pub id: String,
    pub value: Value,
}

/// Result of loading the recipe search paths
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    pub recipes: Vec<Arc<Recipe>>,
    /// Non-fatal problems (malformed or duplicate recipe files)
    pub warnings: Vec<String>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: recipes.into_iter().map(Arc::new).collect(),
            warnings: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Arc<Recipe>> {
        self.recipes
            .iter()
            .filter(|r| r.id == id)
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Recipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_minimal_recipe() {
        let recipe = parse(json!({
            "Id": "Console",
            "Version": "1.2.0",
            "Name": "Console app"
        }));
        assert_eq!(recipe.id, "Console");
        assert_eq!(recipe.version, Version::new(1, 2, 0));
        assert_eq!(recipe.priority, 0);
        assert!(recipe.rules.is_empty());
        assert_eq!(recipe.execution_environment(), "Console_1.2.0");
    }

    #[test]
    fn parses_option_settings() {
        let recipe = parse(json!({
            "Id": "Web",
            "Version": "1.0.0",
            "Name": "Web",
            "OptionSettings": [{
                "Id": "Port",
                "Type": "Int",
                "DefaultValue": 80,
                "Validators": [{ "Type": "Range", "Min": 1, "Max": 65535 }],
                "DependsOn": [{ "Id": "Public", "Value": true }]
            }]
        }));
        let port = recipe.setting("Port").unwrap();
        assert_eq!(port.value_type, OptionSettingValueType::Int);
        assert_eq!(port.default_value, json!(80));
        assert_eq!(port.validators.len(), 1);
        assert_eq!(port.depends_on[0].id, "Public");
    }

    #[test]
    fn template_dir_is_relative_to_recipe_file() {
        let mut recipe = parse(json!({
            "Id": "Web",
            "Version": "1.0.0",
            "Name": "Web",
            "Template": { "Directory": "templates/Web", "Token": "WebTemplate" }
        }));
        recipe.source_path = PathBuf::from("/recipes/web.recipe");
        assert_eq!(
            recipe.template_dir(),
            Some(PathBuf::from("/recipes/templates/Web"))
        );
    }

    #[test]
    fn catalog_find_prefers_highest_version() {
        let older = parse(json!({ "Id": "Web", "Version": "1.0.0", "Name": "Web" }));
        let newer = parse(json!({ "Id": "Web", "Version": "1.1.0", "Name": "Web" }));
        let catalog = RecipeCatalog::new(vec![older, newer]);
        assert_eq!(catalog.find("Web").unwrap().version, Version::new(1, 1, 0));
        assert!(catalog.find("Other").is_none());
    }
}
