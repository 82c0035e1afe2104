//! Common test utilities for Stackwright CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with temp directories
//! - Project fixtures for the bundled sample recipes

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const WEB_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <AssemblyName>App</AssemblyName>
  </PropertyGroup>
</Project>
"#;

pub const CONSOLE_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
</Project>
"#;

/// Result of running a Stackwright CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Last stdout line parsed as JSON (the command result under `--json`)
    pub fn json(&self) -> serde_json::Value {
        let line = self
            .stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or_else(|| panic!("no stdout; stderr:\n{}", self.stderr));
        serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }

    /// Every stdout line parsed as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("NDJSON line"))
            .collect()
    }
}

/// Isolated workspace (projects live here) and home directory.
pub struct TestEnv {
    pub root: TempDir,
    pub home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create workspace temp dir"),
            home: TempDir::new().expect("Failed to create home temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stackwright")),
        }
    }

    /// Workspace with `App/App.csproj` (ASP.NET Core web project + Dockerfile)
    pub fn with_web_project() -> Self {
        let env = Self::new();
        env.write("App/App.csproj", WEB_PROJECT);
        env.write("App/Dockerfile", "FROM mcr.microsoft.com/dotnet/aspnet:8.0\n");
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.path(relative), content);
    }

    pub fn write_home(&self, relative: &str, content: &str) {
        write_file(&self.home_path(relative), content);
    }

    /// Recipes shipped in the repository
    pub fn sample_recipes() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("recipes")
    }

    /// Run with the sample recipes on the search path
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let recipes = Self::sample_recipes();
        let mut full_args: Vec<&str> = vec!["--recipes-path", recipes.to_str().unwrap()];
        full_args.extend_from_slice(args);
        self.run_raw(&full_args, env_vars)
    }

    /// Run without adding any flags
    pub fn run_raw(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env("STACKWRIGHT_TEST_HOME", self.home.path())
            .env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        for key in [
            "RUST_LOG",
            "AWS_PROFILE",
            "AWS_REGION",
            "AWS_DEFAULT_REGION",
            "AWS_ACCOUNT_ID",
            "AWS_EXECUTION_ENV",
            "STACKWRIGHT_RECIPES_PATH",
            "STACKWRIGHT_DEPLOY_TOOL",
            "STACKWRIGHT_DEPLOY_WORKSPACE",
            "STACKWRIGHT_VERBOSITY",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute stackwright");
        to_result(output)
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Files directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("read_dir {}: {}", dir.display(), e))
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
