//! Stackwright CLI - recipe-driven deployment planner
//!
//! Usage: stackwright <COMMAND>
//!
//! Commands:
//!   recommend  List the recipes that apply to a project
//!   generate   Materialize a deployment project
//!   deploy     Materialize and hand off to the deployment tool
//!   list       List persisted deployments

mod commands;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use stackwright::config::Config;
use stackwright::presentation::output::EXIT_SUCCESS;
use stackwright::presentation::{exit_code, print_error, Cli, Commands};

use commands::CommandContext;

/// Conventional exit status after a second Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            print_error(&err, json);
            exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let project_dir = cli.command.project_dir();
    let (config, warnings) = Config::load_layered(project_dir.as_deref(), cli.config.as_deref())?;

    init_tracing(cli.verbose, &config);
    for warning in &warnings {
        warn!("{}", warning);
    }

    let cancel = Arc::new(AtomicBool::new(false));
    if matches!(cli.command, Commands::Deploy { .. }) {
        install_interrupt_handler(cancel.clone())?;
    }

    let ctx = CommandContext::new(&cli, config, cancel);
    match cli.command {
        Commands::Recommend { project } => commands::cmd_recommend(&ctx, &project),
        Commands::Generate {
            project,
            output,
            recipe,
            set,
            yes,
        } => commands::cmd_generate(&ctx, &project, output, recipe, &set, yes),
        Commands::Deploy {
            project,
            name,
            recipe,
            set,
            yes,
        } => commands::cmd_deploy(&ctx, &project, name, recipe, &set, yes),
        Commands::List => commands::cmd_list(&ctx),
    }
}

/// `RUST_LOG` wins; otherwise `-v` is debug, `-vv` trace, else the configured
/// verbosity. Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: u8, config: &Config) {
    let default_directive = match verbose {
        0 => config.output.verbosity.filter_directive(),
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// First Ctrl-C asks the running tool to stop; a second one exits at once.
fn install_interrupt_handler(cancel: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        if cancel.swap(true, Ordering::SeqCst) {
            std::process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("Interrupt received, stopping the deployment tool...");
    })?;
    Ok(())
}
