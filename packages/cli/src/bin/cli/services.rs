// ABOUTME: Service catalog commands
// ABOUTME: Listing is open to every role; adding and deleting require ManageServices

use clap::Subcommand;
use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;
use agentdash_core::{validate_service_input, Service, ServiceCategory, ServiceCreateInput};
use agentdash_storage::EntityStore;

use super::utils::{new_table, truncate, yes_no};

#[derive(Subcommand)]
pub enum ServicesCommands {
    /// List services in the catalog
    List {
        /// Only show one category (e.g. "DB", "SCRAPING - CRAWLING")
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a service to the catalog
    Add {
        /// Service name
        #[arg(short, long)]
        name: String,
        /// Service category
        #[arg(short, long)]
        category: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Pricing model, e.g. "Pay per use"
        #[arg(long, default_value = "")]
        cost_structure: String,
        /// Price per unit, e.g. "$0.002 / call"
        #[arg(long, default_value = "")]
        cost_per_unit: String,
        /// The service has a free tier
        #[arg(long)]
        free_tier: bool,
    },
    /// Delete a service from the catalog
    Delete {
        /// Service ID to delete
        id: String,
    },
}

impl ServicesCommands {
    pub fn mutates(&self) -> bool {
        !matches!(self, ServicesCommands::List { .. })
    }
}

pub async fn handle_services_command(
    app: &AppContext,
    command: ServicesCommands,
) -> anyhow::Result<()> {
    match command {
        ServicesCommands::List { category } => list_services(app, category.as_deref()).await,
        ServicesCommands::Add {
            name,
            category,
            id,
            cost_structure,
            cost_per_unit,
            free_tier,
        } => {
            let input = ServiceCreateInput {
                id,
                name,
                category: category.parse()?,
                cost_structure,
                cost_per_unit,
                has_freetier: free_tier,
                logo: None,
            };
            add_service(app, input).await
        }
        ServicesCommands::Delete { id } => delete_service(app, &id).await,
    }
}

async fn list_services(app: &AppContext, category: Option<&str>) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let services = match category {
        Some(name) => {
            let category: ServiceCategory = name.parse()?;
            app.db.services.list_by_category(category).await
        }
        None => app.db.services.get_all().await?,
    };

    if services.is_empty() {
        println!("{}", "No services found".yellow());
        return Ok(());
    }

    println!("{}", "🔌 Services".blue().bold());
    println!();
    print_services_table(&services);
    println!("Total: {} services", services.len().to_string().cyan());
    Ok(())
}

fn print_services_table(services: &[Service]) {
    let mut table = new_table(vec![
        "ID", "Name", "Category", "Cost structure", "Cost per unit", "Free tier",
    ]);
    for service in services {
        table.add_row(vec![
            service.id.clone(),
            truncate(&service.name, 25),
            service.category.to_string(),
            truncate(&service.cost_structure, 25),
            service.cost_per_unit.clone(),
            yes_no(service.has_freetier).to_string(),
        ]);
    }
    println!("{}", table);
}

async fn add_service(app: &AppContext, input: ServiceCreateInput) -> anyhow::Result<()> {
    app.require(Permission::ManageServices)?;
    validate_service_input(&input)?;

    let service = app.db.services.add(Service::from_create_input(input)).await?;
    println!(
        "{} Added service '{}' ({})",
        "✓".green(),
        service.name,
        service.id.cyan()
    );
    Ok(())
}

async fn delete_service(app: &AppContext, id: &str) -> anyhow::Result<()> {
    app.require(Permission::ManageServices)?;

    if app.db.services.delete(id).await? {
        println!("{} Deleted service {}", "✓".green(), id.cyan());
    } else {
        println!("{}", format!("No service with ID '{}'", id).yellow());
    }
    Ok(())
}
