use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use chemassist_core::agents::EnvSettings;
use chemassist_core::ModelManager;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod editor;

use commands::assist::{self, AssistCommand};
use commands::config::{self, ConfigArgs};

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  chemassist generate アスピリン --to-canvas\n  chemassist --model claude-3-haiku-20240307 ask \"求核置換反応とは？\"\n  chemassist react CCO \"CC(=O)O\" --conditions 硫酸触媒\n  CHEMASSIST_USE_MOCK=true chemassist --json analyze c1ccccc1\n  chemassist config check";

#[derive(Debug, Parser)]
#[command(
    name = "chemassist",
    about = "Chemistry assistant backed by OpenAI, Anthropic or Google models",
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    /// Model id to use instead of the configured default.
    #[arg(long, global = true)]
    model: Option<String>,
    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "List the model catalogue")]
    Models,
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(flatten)]
    Assist(AssistCommand),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<bool> {
    let settings = EnvSettings::new();
    match cli.command {
        Commands::Models => {
            commands::models::run(&settings, cli.json)?;
            Ok(true)
        }
        Commands::Config(args) => {
            config::run(args, &settings)?;
            Ok(true)
        }
        Commands::Assist(command) => {
            let manager = ModelManager::live(Arc::new(settings))?;
            assist::run(manager, cli.model.as_deref(), command, cli.json).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
