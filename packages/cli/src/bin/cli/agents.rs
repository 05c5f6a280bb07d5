// ABOUTME: Agent commands: listing, details, activation, and ROI updates
// ABOUTME: Mutating subcommands require the EditAgents permission

use clap::Subcommand;
use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;
use agentdash_core::Agent;
use agentdash_storage::{EntityStore, StorageError};

use super::roi::{print_cost_analysis, RoiArgs};
use super::utils::{currency, new_table, percent, truncate, yes_no};

#[derive(Subcommand)]
pub enum AgentsCommands {
    /// List all agents
    List {
        /// Only show active agents
        #[arg(long)]
        active: bool,
    },
    /// Show agent details
    Show {
        /// Agent ID to show
        id: String,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark an agent as active
    Activate {
        /// Agent ID to activate
        id: String,
    },
    /// Mark an agent as inactive
    Deactivate {
        /// Agent ID to deactivate
        id: String,
    },
    /// Replace an agent's ROI inputs and recompute its cost analysis
    Roi {
        /// Agent ID to update
        id: String,
        #[command(flatten)]
        inputs: RoiArgs,
    },
    /// Re-copy an agent's services from the service catalog
    RefreshServices {
        /// Agent ID to refresh
        id: String,
    },
}

impl AgentsCommands {
    /// Whether the command changes stored agents
    pub fn mutates(&self) -> bool {
        !matches!(self, AgentsCommands::List { .. } | AgentsCommands::Show { .. })
    }
}

pub async fn handle_agents_command(app: &AppContext, command: AgentsCommands) -> anyhow::Result<()> {
    match command {
        AgentsCommands::List { active } => list_agents(app, active).await,
        AgentsCommands::Show { id, json } => show_agent(app, &id, json).await,
        AgentsCommands::Activate { id } => set_active(app, &id, true).await,
        AgentsCommands::Deactivate { id } => set_active(app, &id, false).await,
        AgentsCommands::Roi { id, inputs } => update_roi(app, &id, inputs).await,
        AgentsCommands::RefreshServices { id } => refresh_services(app, &id).await,
    }
}

async fn list_agents(app: &AppContext, active_only: bool) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let agents = if active_only {
        app.db.agents.list_active().await
    } else {
        app.db.agents.get_all().await?
    };

    if agents.is_empty() {
        println!("{}", "No agents found".yellow());
        println!(
            "{}",
            "Use 'agentdash manifest import <file>' to add one".dimmed()
        );
        return Ok(());
    }

    println!("{}", "🤖 Agents".blue().bold());
    println!();

    let mut table = new_table(vec![
        "ID", "Title", "Version", "Active", "Primary LLM", "Total cost", "ROI",
    ]);
    for agent in &agents {
        table.add_row(vec![
            agent.id.clone(),
            truncate(&agent.title, 30),
            agent.version.clone(),
            yes_no(agent.is_active).to_string(),
            agent.primary_llm().unwrap_or("—").to_string(),
            currency(agent.total_cost),
            percent(agent.roi()),
        ]);
    }

    println!("{}", table);
    println!("Total: {} agents", agents.len().to_string().cyan());
    Ok(())
}

async fn show_agent(app: &AppContext, id: &str, json: bool) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let agent = app.db.agents.require(id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&agent)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("🤖 Agent Details - {}", agent.title).blue().bold()
    );
    println!();
    print_agent_details(&agent);
    Ok(())
}

fn print_agent_details(agent: &Agent) {
    println!("{:<14} {}", "ID:".bold(), agent.id);
    println!("{:<14} {}", "Version:".bold(), agent.version);
    if !agent.subtitle.is_empty() {
        println!("{:<14} {}", "Subtitle:".bold(), agent.subtitle);
    }
    if !agent.description.is_empty() {
        println!("{:<14} {}", "Description:".bold(), agent.description);
    }
    println!("{:<14} {}", "Active:".bold(), yes_no(agent.is_active));
    if !agent.tags.is_empty() {
        println!("{:<14} {}", "Tags:".bold(), agent.tags.join(", "));
    }
    println!("{:<14} {}", "LLMs:".bold(), agent.llms.join(", "));
    println!(
        "{:<14} {} (services {} + LLM {})",
        "Total cost:".bold(),
        currency(agent.total_cost),
        currency(agent.services_cost),
        currency(agent.llm_cost)
    );
    if !agent.has_consistent_costs() {
        println!(
            "{}",
            "  ⚠ total cost does not equal services + LLM cost".yellow()
        );
    }
    println!(
        "{:<14} quality {} · speed {} · saving {} · privacy {}",
        "Scores:".bold(),
        agent.scores.quality,
        agent.scores.speed,
        agent.scores.saving,
        agent.scores.privacy
    );

    if !agent.services.is_empty() {
        println!();
        let mut table = new_table(vec!["Service", "Category", "Cost per unit", "Free tier"]);
        for service in &agent.services {
            table.add_row(vec![
                service.name.clone(),
                service.category.to_string(),
                service.cost_per_unit.clone(),
                yes_no(service.has_freetier).to_string(),
            ]);
        }
        println!("{}", table);
    }

    if !agent.nodes.is_empty() {
        println!();
        let mut table = new_table(vec!["Node", "Type", "LLM"]);
        for node in &agent.nodes {
            table.add_row(vec![node.name.clone(), node.node_type.clone(), node.llm.clone()]);
        }
        println!("{}", table);
    }

    if !agent.sessions.is_empty() {
        println!();
        println!("{:<14} {}", "Sessions:".bold(), agent.sessions.len());
    }

    if let Some(analysis) = &agent.cost_analysis {
        println!();
        print_cost_analysis(analysis);
    }
}

async fn set_active(app: &AppContext, id: &str, is_active: bool) -> anyhow::Result<()> {
    app.require(Permission::EditAgents)?;

    let agent = app.db.agents.set_active(id, is_active).await?;
    let state = if agent.is_active { "activated" } else { "deactivated" };
    println!("{} Agent '{}' {}", "✓".green(), agent.title, state);
    Ok(())
}

async fn update_roi(app: &AppContext, id: &str, inputs: RoiArgs) -> anyhow::Result<()> {
    app.require(Permission::EditAgents)?;

    let agent = match app.db.agents.update_cost_analysis(id, inputs.into()).await {
        Ok(agent) => agent,
        Err(StorageError::Validation(err)) => {
            anyhow::bail!("Invalid ROI inputs: {}", err)
        }
        Err(err) => return Err(err.into()),
    };

    println!("{} Updated cost analysis for '{}'", "✓".green(), agent.title);
    if let Some(analysis) = &agent.cost_analysis {
        println!();
        print_cost_analysis(analysis);
    }
    Ok(())
}

async fn refresh_services(app: &AppContext, id: &str) -> anyhow::Result<()> {
    app.require(Permission::EditAgents)?;

    let agent = app.db.refresh_agent_services(id).await?;
    println!(
        "{} Refreshed {} service(s) on '{}'",
        "✓".green(),
        agent.services.len(),
        agent.title
    );
    Ok(())
}
