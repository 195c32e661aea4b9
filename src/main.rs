// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! agentscout main entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use agentscout::agents::DefinitionSource;
use agentscout::auth::LocalAuthStore;
use agentscout::cli::{AgentsCommand, AuthCommand};
use agentscout::config::{self, CliOptions};
use agentscout::discovery::AgentCatalog;
use agentscout::telemetry::{init_telemetry, TelemetryConfig};

/// agentscout version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// agentscout - discover ACP coding agents and check their health.
#[derive(Parser)]
#[command(name = "agentscout")]
#[command(author, version, about = "Discover ACP coding agents and check their health", long_about = None)]
struct Cli {
    /// Extra directory of agent definition files (repeatable)
    #[arg(long = "agent-dir", global = true, env = "AGENTSCOUT_AGENT_DIR")]
    agent_dirs: Vec<PathBuf>,

    /// Path of the local credential store
    #[arg(long, global = true, env = "AGENTSCOUT_AUTH_FILE")]
    auth_file: Option<PathBuf>,

    /// Ignore the built-in registry; only local definitions are used
    #[arg(long, global = true)]
    no_registry: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "AGENTSCOUT_LOG")]
    log_level: Option<String>,

    /// Show verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Show debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for agentscout.
#[derive(Subcommand)]
enum Commands {
    /// Discover agents, inspect them, and run health checks
    Agents {
        #[command(subcommand)]
        action: AgentsCommand,
    },

    /// Manage the local credential store
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Show version information
    Version,
}

/// Config subcommand actions.
#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// List the config files that contribute, lowest precedence first
    Sources,
    /// Write an example workspace config file
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_options = CliOptions {
        agent_dirs: cli.agent_dirs,
        auth_file: cli.auth_file,
        no_registry: cli.no_registry,
        log_level: cli.log_level,
    };

    let current_dir = std::env::current_dir()?;
    let workspace_root = config::find_workspace_root(&current_dir).unwrap_or(current_dir);
    let config = config::load_config(&workspace_root, cli_options)?;

    init_telemetry(&TelemetryConfig::for_cli(
        cli.verbose,
        cli.debug,
        &config.log_level,
    ))?;

    match cli.command {
        Commands::Agents { action } => {
            let catalog = build_catalog(&config);
            action.execute(&catalog).await
        }
        Commands::Auth { action } => {
            let catalog = build_catalog(&config);
            let store = LocalAuthStore::open(config.auth_file_path())?;
            action.execute(&store, &catalog).await
        }
        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
                Some(ConfigAction::Sources) => {
                    let sources = config::config_sources(&workspace_root);
                    if sources.is_empty() {
                        println!("{}", "No config files; using defaults".dimmed());
                    }
                    for (layer, path) in sources {
                        println!("{:<10} {}", layer.to_string().cyan(), path.display());
                    }
                }
                Some(ConfigAction::Init) => {
                    let path = config::init_config(&workspace_root, None)?;
                    println!("{} Created config file: {}", "✓".green(), path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("agentscout {}", VERSION);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_catalog(config: &config::ResolvedConfig) -> AgentCatalog {
    AgentCatalog::with_defaults(DefinitionSource::new(config.definition_dirs()))
        .include_registry(config.include_registry)
}
