// ABOUTME: Dashboard overview command
// ABOUTME: Agent counts, total spend, average ROI, and services per category

use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;

use super::utils::{currency, new_table};

pub async fn handle_summary_command(app: &AppContext, json: bool) -> anyhow::Result<()> {
    let user = app.require(Permission::ViewDashboard)?;
    let summary = app.db.summary().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "📊 Agentdash Overview".blue().bold());
    println!("{}", format!("Signed in as {} ({})", user.id, user.role).dimmed());
    println!();

    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec!["Agents".to_string(), summary.total_agents.to_string()]);
    table.add_row(vec![
        "Active agents".to_string(),
        summary.active_agents.to_string(),
    ]);
    table.add_row(vec!["Total cost".to_string(), currency(summary.total_cost)]);
    table.add_row(vec![
        "Average ROI".to_string(),
        format!("{:.1}%", summary.average_roi),
    ]);
    println!("{}", table);

    if !summary.services_by_category.is_empty() {
        println!();
        let mut table = new_table(vec!["Service category", "Count"]);
        for (category, count) in &summary.services_by_category {
            table.add_row(vec![category.to_string(), count.to_string()]);
        }
        println!("{}", table);
    }
    Ok(())
}
