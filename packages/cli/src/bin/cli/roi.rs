// ABOUTME: ROI calculator command and the shared ROI argument group
// ABOUTME: Prints annual savings, agent cost, and the rounded ROI percentage

use clap::Args;
use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;
use agentdash_core::{CostAnalysis, RoiInputs};

use super::utils::{currency, new_table};

#[derive(Args, Debug, Clone)]
pub struct RoiArgs {
    /// Cost per hour of running the agent
    #[arg(long)]
    pub hourly_rate: f64,
    /// Minutes the agent runs per session
    #[arg(long)]
    pub session_length: f64,
    /// Cost per hour of doing the work by hand
    #[arg(long)]
    pub manual_hourly_rate: f64,
    /// Minutes of manual work saved per session
    #[arg(long)]
    pub time_saved_per_session: f64,
    /// Sessions per year
    #[arg(long)]
    pub annual_sessions: f64,
}

impl From<RoiArgs> for RoiInputs {
    fn from(args: RoiArgs) -> Self {
        RoiInputs {
            hourly_rate: args.hourly_rate,
            session_length: args.session_length,
            manual_hourly_rate: args.manual_hourly_rate,
            time_saved_per_session: args.time_saved_per_session,
            annual_sessions: args.annual_sessions,
        }
    }
}

pub fn handle_roi_command(app: &AppContext, args: RoiArgs) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let analysis = CostAnalysis::new(args.into())?;
    println!("{}", "📈 ROI Calculator".blue().bold());
    println!();
    print_cost_analysis(&analysis);
    Ok(())
}

pub fn print_cost_analysis(analysis: &CostAnalysis) {
    let inputs = analysis.inputs();
    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec!["Hourly rate".to_string(), currency(inputs.hourly_rate)]);
    table.add_row(vec![
        "Session length".to_string(),
        format!("{} min", inputs.session_length),
    ]);
    table.add_row(vec![
        "Manual hourly rate".to_string(),
        currency(inputs.manual_hourly_rate),
    ]);
    table.add_row(vec![
        "Time saved per session".to_string(),
        format!("{} min", inputs.time_saved_per_session),
    ]);
    table.add_row(vec![
        "Annual sessions".to_string(),
        inputs.annual_sessions.to_string(),
    ]);
    table.add_row(vec![
        "Annual time saved".to_string(),
        format!("{:.1} h", analysis.annual_time_saved()),
    ]);
    table.add_row(vec![
        "Annual cost saved".to_string(),
        currency(analysis.annual_cost_saved()),
    ]);
    table.add_row(vec![
        "Annual agent cost".to_string(),
        currency(analysis.annual_agent_cost()),
    ]);
    println!("{}", table);

    let roi = format!("{}%", analysis.roi());
    let roi = if analysis.roi() >= 100 {
        roi.green().bold()
    } else {
        roi.yellow().bold()
    };
    println!("ROI: {}", roi);
}
