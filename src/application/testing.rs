//! In-memory ports shared by the use case tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use semver::Version;
use serde_json::json;
use tempfile::TempDir;

use crate::domain::entities::{
    OptionSettingItem, ProjectDefinition, Recipe, RecipeCatalog, RecipeTemplate,
};
use crate::domain::entities::DeploymentRecord;
use crate::domain::policies::{Predicate, Validator};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, RecipeRepository, SettingsRepository, SettingsStoreResult,
    SourceControlProbe,
};
use crate::domain::value_objects::OptionSettingValueType;
use crate::error::StackwrightResult;

pub struct MemoryRecipes(pub Vec<Recipe>);

impl RecipeRepository for MemoryRecipes {
    fn load_catalog(&self) -> StackwrightResult<RecipeCatalog> {
        Ok(RecipeCatalog::new(self.0.clone()))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<DeploymentRecord>>,
}

impl MemoryStore {
    pub fn with(record: DeploymentRecord) -> Self {
        Self {
            records: Mutex::new(vec![record]),
        }
    }
}

impl SettingsRepository for MemoryStore {
    fn load(&self, project_path: &Path) -> SettingsStoreResult<Option<DeploymentRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.project_path == project_path)
            .cloned())
    }

    fn save(&self, record: &DeploymentRecord) -> SettingsStoreResult<()> {
        let mut records = self.records.lock().unwrap();
        records.retain(|r| r.project_path != record.project_path);
        records.push(record.clone());
        Ok(())
    }

    fn list(&self) -> SettingsStoreResult<Vec<DeploymentRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }
}

impl SettingsRepository for Arc<MemoryStore> {
    fn load(&self, project_path: &Path) -> SettingsStoreResult<Option<DeploymentRecord>> {
        self.as_ref().load(project_path)
    }

    fn save(&self, record: &DeploymentRecord) -> SettingsStoreResult<()> {
        self.as_ref().save(record)
    }

    fn list(&self) -> SettingsStoreResult<Vec<DeploymentRecord>> {
        self.as_ref().list()
    }
}

pub struct FixedProbe(pub bool);

impl SourceControlProbe for FixedProbe {
    fn is_under_source_control(&self, _dir: &Path) -> bool {
        self.0
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<DeployEvent>>,
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// `<root>/App/App.csproj`, a web project on net8.0
pub fn web_project(root: &TempDir) -> ProjectDefinition {
    let app = root.path().join("App");
    std::fs::create_dir_all(&app).unwrap();
    let file = app.join("App.csproj");
    std::fs::write(&file, "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />").unwrap();
    ProjectDefinition::for_file(file)
        .with_sdk("Microsoft.NET.Sdk.Web")
        .with_target_framework("net8.0")
}

/// Fargate-style recipe with a one-file template under `<root>/recipes`
pub fn fargate_recipe(root: &TempDir) -> Recipe {
    let recipes = root.path().join("recipes");
    let template = recipes.join("templates").join("fargate");
    std::fs::create_dir_all(&template).unwrap();
    std::fs::write(
        template.join("Program.cs"),
        "namespace AppStack; // {{RecipeId}}",
    )
    .unwrap();
    let source = recipes.join("fargate.recipe");
    std::fs::write(&source, "{\"Id\": \"AspNetAppEcsFargate\"}").unwrap();

    Recipe {
        id: "AspNetAppEcsFargate".into(),
        version: Version::new(1, 0, 0),
        name: "ASP.NET Core App to Amazon ECS using AWS Fargate".into(),
        description: String::new(),
        target_service: "Amazon Elastic Container Service".into(),
        priority: 100,
        template: Some(RecipeTemplate {
            directory: PathBuf::from("templates/fargate"),
            token: "AppStack".into(),
        }),
        rules: vec![Predicate::ProjectSdk {
            values: vec!["Microsoft.NET.Sdk.Web".into()],
        }],
        option_settings: vec![
            OptionSettingItem::new("ServiceName", OptionSettingValueType::String)
                .with_default(json!("{StackName}-service"))
                .with_validator(Validator::Required),
            OptionSettingItem::new("DesiredCount", OptionSettingValueType::Int)
                .with_default(json!(3))
                .with_validator(Validator::Range {
                    min: Some(1.0),
                    max: Some(10.0),
                }),
        ],
        source_path: source,
    }
}
