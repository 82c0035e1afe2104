use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

/// Stackwright - recipe-driven deployment planner
#[derive(Parser, Debug)]
#[command(name = "stackwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events, JSON results)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Additional recipe search path (repeatable, searched first)
    #[arg(long = "recipes-path", value_name = "DIR", global = true)]
    pub recipes_paths: Vec<PathBuf>,

    /// Use this configuration file instead of the user and project files
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Declare a host capability without probing for it (repeatable)
    #[arg(long = "capability", value_name = "NAME", global = true)]
    pub capabilities: Vec<String>,

    #[command(flatten)]
    pub aws: AwsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target account flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct AwsArgs {
    /// Credential profile handed to the deployment tool
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Target region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Target account id
    #[arg(long, global = true)]
    pub account: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the recipes that apply to a project, best first
    Recommend {
        /// Project file or directory
        #[arg(default_value = ".")]
        project: PathBuf,
    },

    /// Materialize a deployment project without deploying it
    Generate {
        /// Project file or directory
        #[arg(default_value = ".")]
        project: PathBuf,

        /// Where to write the deployment project
        /// (default: <ProjectDir>DeploymentProject next to the project)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Recipe id (default: the top recommendation)
        #[arg(long, value_name = "ID")]
        recipe: Option<String>,

        /// Override an option setting (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a deployment project and hand it to the deployment tool
    Deploy {
        /// Project file or directory
        #[arg(default_value = ".")]
        project: PathBuf,

        /// Cloud application (stack) name
        #[arg(long, value_name = "APP")]
        name: Option<String>,

        /// Recipe id (default: the top recommendation)
        #[arg(long, value_name = "ID")]
        recipe: Option<String>,

        /// Override an option setting (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// List persisted deployments
    List,
}

impl Commands {
    /// Project argument of the command, if it takes one
    pub fn project(&self) -> Option<&Path> {
        match self {
            Commands::Recommend { project }
            | Commands::Generate { project, .. }
            | Commands::Deploy { project, .. } => Some(project.as_path()),
            Commands::List => None,
        }
    }

    /// Directory holding the project's `.stackwright/config.toml`
    pub fn project_dir(&self) -> Option<PathBuf> {
        self.project().map(|project| {
            if project.is_file() {
                project
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            } else {
                project.to_path_buf()
            }
        })
    }
}
