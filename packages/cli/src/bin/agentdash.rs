use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

use agentdash_cli::{init_tracing, AppContext, SessionOptions};
use agentdash_config::Config;
use cli::agents::AgentsCommands;
use cli::manifest::ManifestCommands;
use cli::models::ModelsCommands;
use cli::roi::RoiArgs;
use cli::services::ServicesCommands;

#[derive(Parser)]
#[command(name = "agentdash")]
#[command(about = "Agentdash CLI - admin dashboard for AI agents")]
#[command(version)]
struct Cli {
    /// Act as this user id (defaults to AGENTDASH_USER)
    #[arg(long, global = true)]
    user: Option<String>,
    /// Override the acting user's role: base, admin, or owner
    #[arg(long, global = true)]
    role: Option<String>,
    /// Load and save all stores in this JSON file (defaults to AGENTDASH_STATE)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage agents
    #[command(subcommand)]
    Agents(AgentsCommands),
    /// Manage the service catalog
    #[command(subcommand)]
    Services(ServicesCommands),
    /// Browse LLM models and pricing
    #[command(subcommand)]
    Models(ModelsCommands),
    /// Calculate ROI for a set of inputs
    Roi(RoiArgs),
    /// Export and import agent manifests
    #[command(subcommand)]
    Manifest(ManifestCommands),
    /// Show the dashboard overview
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn mutates(&self) -> bool {
        match self {
            Commands::Agents(command) => command.mutates(),
            Commands::Services(command) => command.mutates(),
            Commands::Models(command) => command.mutates(),
            Commands::Manifest(command) => command.mutates(),
            Commands::Roi(_) | Commands::Summary { .. } => false,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let options = SessionOptions {
        user: args.user,
        role: args.role,
        state: args.state,
    };
    let app = AppContext::bootstrap(config, options).await?;

    let mutates = args.command.mutates();
    match args.command {
        Commands::Agents(command) => cli::agents::handle_agents_command(&app, command).await,
        Commands::Services(command) => {
            cli::services::handle_services_command(&app, command).await
        }
        Commands::Models(command) => cli::models::handle_models_command(&app, command).await,
        Commands::Roi(inputs) => cli::roi::handle_roi_command(&app, inputs),
        Commands::Manifest(command) => {
            cli::manifest::handle_manifest_command(&app, command).await
        }
        Commands::Summary { json } => cli::summary::handle_summary_command(&app, json).await,
    }?;

    if mutates && !app.persist().await? {
        println!(
            "{}",
            "Changes were not saved; pass --state <file> or set AGENTDASH_STATE to keep them"
                .dimmed()
        );
    }
    Ok(())
}
