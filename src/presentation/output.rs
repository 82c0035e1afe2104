//! Output Rendering
//!
//! Text and JSON rendering for command results and errors, plus the mapping
//! from error class to process exit code.

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::application::{DeployResult, GenerateResult};
use crate::domain::entities::{DeploymentRecord, OrchestratorSession, Recommendation};
use crate::error::{ErrorClass, StackwrightError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USER_ERROR: i32 = 1;
pub const EXIT_UNHANDLED_EXCEPTION: i32 = 255;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    bullet: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            bullet: "•",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            bullet: "-",
        }
    }
}

/// Renders command results for a terminal or for scripts
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub format: OutputFormat,
    pub unicode: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, unicode: bool) -> Self {
        Self { format, unicode }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    pub fn recommendations(&self, session: &OrchestratorSession, recs: &[Recommendation]) -> String {
        if self.format == OutputFormat::Json {
            let items: Vec<Value> = recs
                .iter()
                .map(|rec| {
                    json!({
                        "id": rec.recipe.id,
                        "version": rec.recipe.version.to_string(),
                        "name": rec.recipe.name,
                        "priority": rec.priority,
                        "target_service": rec.recipe.target_service,
                        "description": rec.recipe.description,
                    })
                })
                .collect();
            return json!({
                "command": "recommend",
                "project": session.project.project_path().display().to_string(),
                "recommendations": items,
            })
            .to_string()
                + "\n";
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Recommendations for {} ({})",
            session.project.assembly_name(),
            session.project.project_path().display()
        );
        let _ = writeln!(out);
        for (i, rec) in recs.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} [{} {}]",
                i + 1,
                rec.recipe.name,
                rec.recipe.id,
                rec.recipe.version
            );
            if !rec.recipe.target_service.is_empty() {
                let _ = writeln!(out, "     Service: {}", rec.recipe.target_service);
            }
            if !rec.recipe.description.is_empty() {
                let _ = writeln!(out, "     {}", rec.recipe.description);
            }
        }
        out
    }

    pub fn generated(&self, result: &GenerateResult) -> String {
        if self.format == OutputFormat::Json {
            return json!({
                "command": "generate",
                "recipe": result.recipe_id,
                "recipe_version": result.recipe_version,
                "destination": result.destination().display().to_string(),
                "module": result.project.module_name,
                "settings_path": result.project.settings_path.display().to_string(),
                "snapshot_path": result.project.snapshot_path.display().to_string(),
                "files": result.file_count(),
                "settings": result.settings,
            })
            .to_string()
                + "\n";
        }

        let icons = self.icons();
        let mut out = String::new();
        let _ = writeln!(out, "{} Deployment project generated", icons.check);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  Recipe:      {} ({} {})",
            result.recipe_name, result.recipe_id, result.recipe_version
        );
        let _ = writeln!(out, "  Destination: {}", result.destination().display());
        let _ = writeln!(out, "  Files:       {}", result.file_count());
        let _ = writeln!(out, "  Settings:");
        for (id, value) in &result.settings {
            let _ = writeln!(out, "    {} {} = {}", icons.bullet, id, value);
        }
        out
    }

    pub fn deployed(&self, result: &DeployResult) -> String {
        if self.format == OutputFormat::Json {
            return json!({
                "command": "deploy",
                "application": result.application,
                "recipe": result.recipe_id,
                "recipe_version": result.recipe_version,
                "destination": result.project.directory.display().to_string(),
                "status": result.status.to_string(),
            })
            .to_string()
                + "\n";
        }

        let icons = self.icons();
        let mut out = String::new();
        let icon = if result.is_success() {
            icons.check
        } else {
            icons.cross
        };
        let _ = writeln!(
            out,
            "{} {} deployed with {} {}",
            icon, result.application, result.recipe_id, result.recipe_version
        );
        let _ = writeln!(out, "  Project: {}", result.project.directory.display());
        out
    }

    pub fn deployments(&self, records: &[DeploymentRecord]) -> String {
        if self.format == OutputFormat::Json {
            let items: Vec<Value> = records
                .iter()
                .map(|r| {
                    json!({
                        "application": r.application.name,
                        "recipe": r.application.recipe_id,
                        "recipe_version": r.application.recipe_version,
                        "project": r.project_path.display().to_string(),
                        "profile": r.profile,
                        "region": r.region,
                        "status": r.status.to_string(),
                        "updated_at": r.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            return json!({ "command": "list", "deployments": items }).to_string() + "\n";
        }

        if records.is_empty() {
            return "No deployments recorded.\n".to_string();
        }

        let mut out = String::new();
        for r in records {
            let _ = writeln!(
                out,
                "{}  {} {}  {}  {}",
                r.application.name,
                r.application.recipe_id,
                r.application.recipe_version,
                r.status,
                r.updated_at.format("%Y-%m-%d %H:%M")
            );
            let _ = writeln!(out, "  {}", r.project_path.display());
        }
        out
    }
}

/// Exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<StackwrightError>().map(|e| e.class()) {
        Some(ErrorClass::User) | Some(ErrorClass::Loader) => EXIT_USER_ERROR,
        Some(ErrorClass::Subprocess(code)) if code != 0 => code,
        _ => EXIT_UNHANDLED_EXCEPTION,
    }
}

/// Error text for the terminal; defects carry the whole cause chain
pub fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StackwrightError>() {
        Some(e) if e.class() != ErrorClass::Defect => format!("[ERROR] {:#}\n", err),
        _ => format!("[ERROR] unhandled error: {:?}\n", err),
    }
}

pub fn format_error_json(err: &anyhow::Error) -> Value {
    let stackwright = err.downcast_ref::<StackwrightError>();
    let class = match stackwright.map(|e| e.class()) {
        Some(ErrorClass::User) => "user",
        Some(ErrorClass::Loader) => "loader",
        Some(ErrorClass::Subprocess(_)) => "subprocess",
        _ => "defect",
    };
    let mut event = json!({
        "event": "error",
        "class": class,
        "message": format!("{:#}", err),
        "exit_code": exit_code(err),
    });
    if let Some(path) = stackwright.and_then(|e| e.path()) {
        event["path"] = json!(path.display().to_string());
    }
    event
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        println!("{}", format_error_json(err));
        return;
    }
    eprint!("{}", format_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MaterializedProject;
    use crate::domain::entities::{CloudApplication, ProjectDefinition, Recipe};
    use crate::domain::value_objects::{DeploymentStatus, HostCapabilities};
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn recipe(id: &str, name: &str, priority: i32) -> Recipe {
        serde_json::from_value(json!({
            "Id": id,
            "Version": "1.2.0",
            "Name": name,
            "TargetService": "Amazon ECS",
            "Description": "Runs the app on Fargate",
            "Priority": priority,
            "Rules": [],
            "OptionSettings": []
        }))
        .unwrap()
    }

    #[test]
    fn exit_codes_follow_error_class() {
        let user: anyhow::Error = StackwrightError::Aborted.into();
        let loader: anyhow::Error = StackwrightError::NoRecipesFound {
            searched: "/r".into(),
        }
        .into();
        let child: anyhow::Error = StackwrightError::SubprocessFailed {
            step: "deploy".into(),
            recipe: "R".into(),
            code: 42,
        }
        .into();
        let defect = anyhow::anyhow!("boom");

        assert_eq!(exit_code(&user), EXIT_USER_ERROR);
        assert_eq!(exit_code(&loader), EXIT_USER_ERROR);
        assert_eq!(exit_code(&child), 42);
        assert_eq!(exit_code(&defect), EXIT_UNHANDLED_EXCEPTION);
    }

    #[test]
    fn context_does_not_hide_the_class() {
        let err = anyhow::Error::from(StackwrightError::Aborted).context("generate failed");
        assert_eq!(exit_code(&err), EXIT_USER_ERROR);
    }

    #[test]
    fn json_error_carries_path() {
        let err: anyhow::Error = StackwrightError::InvalidSaveDirectory {
            path: PathBuf::from("/code/App/out"),
            message: "is nested".into(),
        }
        .into();
        let event = format_error_json(&err);
        assert_eq!(event["class"], "user");
        assert_eq!(event["path"], "/code/App/out");
        assert_eq!(event["exit_code"], 1);
    }

    #[test]
    fn renders_recommendations_as_text() {
        let session = OrchestratorSession::new(
            ProjectDefinition::for_file("/code/App/App.csproj"),
            HostCapabilities::new(),
        );
        let recs = vec![Recommendation::new(Arc::new(recipe(
            "AspNetAppEcsFargate",
            "ASP.NET Core on Fargate",
            100,
        )))];

        let text = Renderer::new(OutputFormat::Text, false).recommendations(&session, &recs);
        insta::assert_snapshot!(text, @r"
        Recommendations for App (/code/App/App.csproj)

          1. ASP.NET Core on Fargate [AspNetAppEcsFargate 1.2.0]
             Service: Amazon ECS
             Runs the app on Fargate
        ");
    }

    #[test]
    fn renders_generate_result_as_json() {
        let result = GenerateResult {
            recipe_id: "AspNetAppEcsFargate".into(),
            recipe_version: "1.2.0".into(),
            recipe_name: "ASP.NET Core on Fargate".into(),
            created: true,
            project: MaterializedProject {
                directory: PathBuf::from("/code/AppDeploymentProject"),
                module_name: "AppDeploymentProject".into(),
                settings_path: PathBuf::from("/code/AppDeploymentProject/appsettings.json"),
                snapshot_path: PathBuf::from("/code/AppDeploymentProject/x.recipe"),
                files: vec![PathBuf::from("/code/AppDeploymentProject/Program.cs")],
            },
            settings: [("DesiredCount".to_string(), json!(3))].into(),
        };

        let rendered = Renderer::new(OutputFormat::Json, false).generated(&result);
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["command"], "generate");
        assert_eq!(value["files"], 1);
        assert_eq!(value["settings"]["DesiredCount"], 3);
    }

    #[test]
    fn renders_deployment_list() {
        let records = vec![DeploymentRecord {
            project_path: PathBuf::from("/code/App/App.csproj"),
            profile: Some("dev".into()),
            region: Some("us-east-1".into()),
            application: CloudApplication::new("shop", "AspNetAppEcsFargate", "1.2.0"),
            option_values: Default::default(),
            status: DeploymentStatus::Succeeded,
            output_dir: None,
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        }];

        let text = Renderer::new(OutputFormat::Text, false).deployments(&records);
        insta::assert_snapshot!(text, @r"
        shop  AspNetAppEcsFargate 1.2.0  succeeded  2026-03-01 09:30
          /code/App/App.csproj
        ");
    }

    #[test]
    fn empty_list_says_so() {
        let text = Renderer::new(OutputFormat::Text, true).deployments(&[]);
        assert_eq!(text, "No deployments recorded.\n");
    }
}
