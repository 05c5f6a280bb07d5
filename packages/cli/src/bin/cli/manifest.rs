// ABOUTME: Manifest export and import commands
// ABOUTME: Export writes <slug>.yml with JSON content; import requires ImportManifests

use std::path::PathBuf;

use clap::Subcommand;
use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;
use agentdash_manifest::{export_agent_string, import_into_database, read_manifest_file, write_manifest_file};

#[derive(Subcommand)]
pub enum ManifestCommands {
    /// Export an agent to a manifest file
    Export {
        /// Agent ID to export
        id: String,
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Print the manifest instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Import an agent from a manifest file
    Import {
        /// Path to the manifest
        path: PathBuf,
    },
}

impl ManifestCommands {
    pub fn mutates(&self) -> bool {
        matches!(self, ManifestCommands::Import { .. })
    }
}

pub async fn handle_manifest_command(
    app: &AppContext,
    command: ManifestCommands,
) -> anyhow::Result<()> {
    match command {
        ManifestCommands::Export { id, dir, stdout } => export(app, &id, dir, stdout).await,
        ManifestCommands::Import { path } => import(app, path).await,
    }
}

async fn export(app: &AppContext, id: &str, dir: PathBuf, stdout: bool) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let agent = app.db.agents.require(id).await?;
    if stdout {
        println!("{}", export_agent_string(&agent)?);
        return Ok(());
    }

    let path = write_manifest_file(&dir, &agent).await?;
    println!(
        "{} Exported '{}' to {}",
        "✓".green(),
        agent.title,
        path.display().to_string().cyan()
    );
    Ok(())
}

async fn import(app: &AppContext, path: PathBuf) -> anyhow::Result<()> {
    app.require(Permission::ImportManifests)?;

    let content = read_manifest_file(&path).await?;
    let agent = import_into_database(&app.db, &content).await?;
    println!(
        "{} Imported '{}' as {}",
        "✓".green(),
        agent.title,
        agent.id.cyan()
    );
    if app.state_path().is_some() {
        println!(
            "{}",
            "Imported agents start inactive; use 'agentdash agents activate <id>'".dimmed()
        );
    }
    Ok(())
}
