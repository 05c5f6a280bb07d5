// ABOUTME: LLM model catalog commands
// ABOUTME: Lists pricing and estimates the cost of a call for given token counts

use clap::Subcommand;
use colored::*;

use agentdash_auth::Permission;
use agentdash_cli::AppContext;
use agentdash_core::{validate_llm_model_input, LlmModelCreateInput, LlmModelDetails};
use agentdash_storage::EntityStore;

use super::utils::{new_table, truncate};

#[derive(Subcommand)]
pub enum ModelsCommands {
    /// List LLM models
    List {
        /// Only show one provider
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Estimate the cost of a call
    Cost {
        /// Model ID or name
        model: String,
        #[arg(long, default_value = "0")]
        input_tokens: u64,
        #[arg(long, default_value = "0")]
        output_tokens: u64,
    },
    /// Add a model to the catalog
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        provider: String,
        /// Currency per input token
        #[arg(long)]
        input_cost: f64,
        /// Currency per output token
        #[arg(long)]
        output_cost: f64,
        #[arg(long, default_value = "")]
        max_context: String,
    },
}

impl ModelsCommands {
    pub fn mutates(&self) -> bool {
        matches!(self, ModelsCommands::Add { .. })
    }
}

pub async fn handle_models_command(app: &AppContext, command: ModelsCommands) -> anyhow::Result<()> {
    match command {
        ModelsCommands::List { provider } => list_models(app, provider.as_deref()).await,
        ModelsCommands::Cost {
            model,
            input_tokens,
            output_tokens,
        } => estimate_cost(app, &model, input_tokens, output_tokens).await,
        ModelsCommands::Add {
            name,
            provider,
            input_cost,
            output_cost,
            max_context,
        } => {
            let input = LlmModelCreateInput {
                id: None,
                name,
                provider,
                input_cost,
                output_cost,
                max_context,
                strengths: Vec::new(),
                limitations: Vec::new(),
                logo: None,
            };
            add_model(app, input).await
        }
    }
}

async fn list_models(app: &AppContext, provider: Option<&str>) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let models = match provider {
        Some(provider) => app.db.llm_models.list_by_provider(provider).await,
        None => app.db.llm_models.get_all().await?,
    };

    if models.is_empty() {
        println!("{}", "No LLM models found".yellow());
        return Ok(());
    }

    println!("{}", "🧠 LLM Models".blue().bold());
    println!();

    let mut table = new_table(vec![
        "ID", "Name", "Provider", "Input / 1M", "Output / 1M", "Context", "Strengths",
    ]);
    for model in &models {
        table.add_row(vec![
            model.id.clone(),
            model.name.clone(),
            model.provider.clone(),
            per_million(model.input_cost),
            per_million(model.output_cost),
            model.max_context.clone(),
            truncate(&model.strengths.join(", "), 40),
        ]);
    }
    println!("{}", table);
    println!("Total: {} models", models.len().to_string().cyan());
    Ok(())
}

fn per_million(cost_per_token: f64) -> String {
    format!("${:.2}", cost_per_token * 1_000_000.0)
}

async fn find_model(app: &AppContext, model: &str) -> anyhow::Result<LlmModelDetails> {
    if let Some(found) = app.db.llm_models.get_by_id(model).await? {
        return Ok(found);
    }
    app.db
        .llm_models
        .find_by_name(model)
        .await
        .ok_or_else(|| anyhow::anyhow!("LLM model '{}' not found", model))
}

async fn estimate_cost(
    app: &AppContext,
    model: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> anyhow::Result<()> {
    app.require(Permission::ViewDashboard)?;

    let model = find_model(app, model).await?;
    let cost = model.estimate_cost(input_tokens, output_tokens);
    println!(
        "{}: {} input + {} output tokens ≈ {}",
        model.name.bold(),
        input_tokens,
        output_tokens,
        format!("${:.6}", cost).green()
    );
    Ok(())
}

async fn add_model(app: &AppContext, input: LlmModelCreateInput) -> anyhow::Result<()> {
    app.require(Permission::ManageModels)?;
    validate_llm_model_input(&input)?;

    let model = app
        .db
        .llm_models
        .add(LlmModelDetails::from_create_input(input))
        .await?;
    println!(
        "{} Added model '{}' ({})",
        "✓".green(),
        model.name,
        model.id.cyan()
    );
    Ok(())
}
