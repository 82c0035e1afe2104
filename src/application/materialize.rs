//! Deployment project materializer
//!
//! Renders the recipe template into the save directory, writes the resolved
//! settings payload, and finally writes the `<recipeId>-<token>.recipe`
//! snapshot. The snapshot is only written once everything before it
//! succeeded, so its presence marks a complete project.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::{OrchestratorSession, Recipe, Recommendation};
use crate::domain::ports::{DeployEvent, DeployEventSink, FileSystem};
use crate::domain::services::save_location::DEFAULT_DIR_SUFFIX;
use crate::domain::value_objects::SaveCdkDirectory;
use crate::error::{StackwrightError, StackwrightResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::RECIPE_EXTENSION;

/// File name of the settings payload inside a generated project
pub const SETTINGS_FILE_NAME: &str = "appsettings.json";

const RECIPE_ID_PLACEHOLDER: &str = "{{RecipeId}}";
const RECIPE_VERSION_PLACEHOLDER: &str = "{{RecipeVersion}}";
const PROJECT_NAME_PLACEHOLDER: &str = "{{ProjectName}}";

/// What a materialization produced
#[derive(Debug, Clone)]
pub struct MaterializedProject {
    pub directory: PathBuf,
    pub module_name: String,
    pub settings_path: PathBuf,
    pub snapshot_path: PathBuf,
    /// Template files written, in write order
    pub files: Vec<PathBuf>,
}

pub struct ProjectMaterializer<F: FileSystem = LocalFs> {
    fs: F,
}

impl ProjectMaterializer<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for ProjectMaterializer<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> ProjectMaterializer<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn materialize(
        &self,
        rec: &Recommendation,
        session: &OrchestratorSession,
        save_dir: &SaveCdkDirectory,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<MaterializedProject> {
        let recipe = &rec.recipe;
        if !rec.is_ready() {
            let pending = rec
                .pending()
                .into_iter()
                .map(|(id, _)| id)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(StackwrightError::SettingsUnresolved {
                recipe_id: recipe.id.clone(),
                pending,
            });
        }

        let directory = save_dir.path().to_path_buf();
        self.ensure_no_snapshot(&directory)?;

        let module_name = module_name(save_dir, session);
        info!(
            recipe = %recipe.id,
            module = %module_name,
            destination = %directory.display(),
            "materializing deployment project"
        );
        sink.on_event(DeployEvent::Started {
            recipe_id: recipe.id.clone(),
            destination: directory.clone(),
        });

        let renderer = Renderer::new(recipe, &module_name);
        let files = self.render_template(recipe, &renderer, &directory, sink)?;

        let settings_path = directory.join(SETTINGS_FILE_NAME);
        let payload = json!({
            "StackName": session.stack_name(),
            "ProjectPath": session.project.project_path(),
            "RecipeId": recipe.id,
            "RecipeVersion": recipe.version.to_string(),
            "Settings": rec.settings,
        });
        self.fs
            .write(&settings_path, &serde_json::to_string_pretty(&payload)?)
            .map_err(|e| StackwrightError::Io(e.into()))?;
        sink.on_event(DeployEvent::SettingsWritten {
            path: settings_path.clone(),
        });

        let snapshot_path = self.write_snapshot(recipe, &directory)?;
        sink.on_event(DeployEvent::SnapshotWritten {
            path: snapshot_path.clone(),
        });

        Ok(MaterializedProject {
            directory,
            module_name,
            settings_path,
            snapshot_path,
            files,
        })
    }

    /// One snapshot per generated project
    fn ensure_no_snapshot(&self, directory: &Path) -> StackwrightResult<()> {
        let existing = self
            .fs
            .list_dir(directory)
            .map_err(|e| StackwrightError::Io(e.into()))?
            .into_iter()
            .find(|p| has_recipe_extension(p));
        match existing {
            Some(snapshot) => Err(StackwrightError::InvalidSaveDirectory {
                path: directory.to_path_buf(),
                message: format!(
                    "The directory already contains a generated deployment project ({}).",
                    snapshot.display()
                ),
            }),
            None => Ok(()),
        }
    }

    fn render_template(
        &self,
        recipe: &Recipe,
        renderer: &Renderer,
        destination: &Path,
        sink: &dyn DeployEventSink,
    ) -> StackwrightResult<Vec<PathBuf>> {
        let Some(template_dir) = recipe.template_dir() else {
            debug!(recipe = %recipe.id, "recipe has no template");
            return Ok(Vec::new());
        };

        let sources = self
            .fs
            .list_files_recursive(&template_dir)
            .map_err(|e| StackwrightError::Io(e.into()))?;

        let mut written = Vec::with_capacity(sources.len());
        for source in sources {
            if has_recipe_extension(&source) {
                continue;
            }
            let relative = source.strip_prefix(&template_dir).map_err(|_| {
                StackwrightError::Defect(format!(
                    "template file {} is outside {}",
                    source.display(),
                    template_dir.display()
                ))
            })?;
            let target = destination.join(renderer.render(&relative.to_string_lossy()));

            let bytes = self
                .fs
                .read_bytes(&source)
                .map_err(|e| StackwrightError::Io(e.into()))?;
            let result = match String::from_utf8(bytes) {
                Ok(text) => self.fs.write(&target, &renderer.render(&text)),
                // Binary files are copied as-is
                Err(raw) => self.fs.write_bytes(&target, raw.as_bytes()),
            };
            result.map_err(|e| StackwrightError::Io(e.into()))?;

            if sink.wants_detailed_events() {
                sink.on_event(DeployEvent::FileWritten {
                    path: target.clone(),
                });
            }
            written.push(target);
        }
        debug!(count = written.len(), "rendered template files");
        Ok(written)
    }

    /// Copy of the recipe file actually used, under a fresh unique name
    fn write_snapshot(&self, recipe: &Recipe, directory: &Path) -> StackwrightResult<PathBuf> {
        let content = match self.fs.read_bytes(&recipe.source_path) {
            Ok(bytes) if !recipe.source_path.as_os_str().is_empty() => bytes,
            _ => serde_json::to_vec_pretty(recipe)?,
        };

        let mut path = snapshot_path(directory, &recipe.id);
        while self.fs.exists(&path) {
            path = snapshot_path(directory, &recipe.id);
        }
        self.fs
            .write_bytes(&path, &content)
            .map_err(|e| StackwrightError::Io(e.into()))?;
        debug!(path = %path.display(), "wrote recipe snapshot");
        Ok(path)
    }
}

fn snapshot_path(directory: &Path, recipe_id: &str) -> PathBuf {
    directory.join(format!(
        "{}-{}.{}",
        recipe_id,
        Uuid::new_v4().simple(),
        RECIPE_EXTENSION
    ))
}

fn has_recipe_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RECIPE_EXTENSION))
}

/// The save directory's name when the caller chose it, otherwise
/// `<AssemblyName>DeploymentProject`.
pub fn module_name(save_dir: &SaveCdkDirectory, session: &OrchestratorSession) -> String {
    let raw = match save_dir.dir_name() {
        Some(name) if save_dir.caller_specified() => name,
        _ => format!("{}{}", session.project.assembly_name(), DEFAULT_DIR_SUFFIX),
    };
    sanitize_module_name(&raw)
}

/// Keep characters valid in a project/namespace identifier
pub fn sanitize_module_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.'))
        .collect();
    name = name.trim_matches('.').to_string();
    if name.is_empty() {
        return DEFAULT_DIR_SUFFIX.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

struct Renderer {
    replacements: Vec<(String, String)>,
}

impl Renderer {
    fn new(recipe: &Recipe, module_name: &str) -> Self {
        // The token goes first so placeholder values (often the recipe id,
        // which may equal the token) are never rewritten a second time
        let mut replacements = Vec::with_capacity(4);
        if let Some(token) = recipe
            .template
            .as_ref()
            .map(|t| t.token.as_str())
            .filter(|t| !t.is_empty())
        {
            replacements.push((token.to_string(), module_name.to_string()));
        }
        replacements.extend([
            (RECIPE_ID_PLACEHOLDER.to_string(), recipe.id.clone()),
            (
                RECIPE_VERSION_PLACEHOLDER.to_string(),
                recipe.version.to_string(),
            ),
            (PROJECT_NAME_PLACEHOLDER.to_string(), module_name.to_string()),
        ]);
        Self { replacements }
    }

    fn render(&self, input: &str) -> String {
        self.replacements
            .iter()
            .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}
