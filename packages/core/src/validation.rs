// ABOUTME: Form-level validation for agent, service, and LLM model inputs
// ABOUTME: Field rules that the dashboard dialogs enforce before touching the store

use thiserror::Error;

use crate::types::{
    AgentCreateInput, AgentUpdateInput, CategoriesDistribution, LlmModelCreateInput, Scores,
    ServiceCreateInput,
};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_SCORE: f64 = 5.0;
pub const MAX_GROUP_PERCENTAGE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' cannot be empty")]
    EmptyField(String),

    #[error("Field '{0}' exceeds maximum length of {1} characters")]
    TooLong(String, usize),

    #[error("Field '{0}' is out of range: {1}")]
    OutOfRange(String, String),

    #[error("Invalid service category: {0}")]
    InvalidCategory(String),

    #[error("Category group '{0}' sums to {1}%, which exceeds 100%")]
    DistributionOverflow(String, f64),
}

fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong(field.to_string(), MAX_NAME_LENGTH));
    }
    Ok(())
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong(
            "description".to_string(),
            MAX_DESCRIPTION_LENGTH,
        ));
    }
    Ok(())
}

fn validate_cost(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange(
            field.to_string(),
            format!("must be a non-negative number, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_scores(scores: &Scores) -> Result<(), ValidationError> {
    let fields = [
        ("quality", scores.quality),
        ("speed", scores.speed),
        ("saving", scores.saving),
        ("privacy", scores.privacy),
    ];

    for (name, value) in fields {
        if !(0.0..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::OutOfRange(
                format!("scores.{}", name),
                format!("must be between 0 and {}, got {}", MAX_SCORE, value),
            ));
        }
    }

    Ok(())
}

fn validate_distribution(distribution: &CategoriesDistribution) -> Result<(), ValidationError> {
    for (group, categories) in distribution {
        for (category, percentage) in categories {
            if !percentage.is_finite() || *percentage < 0.0 {
                return Err(ValidationError::OutOfRange(
                    format!("categoriesDistribution.{}.{}", group, category),
                    format!("must be a non-negative percentage, got {}", percentage),
                ));
            }
        }

        let total: f64 = categories.values().sum();
        if total > MAX_GROUP_PERCENTAGE {
            return Err(ValidationError::DistributionOverflow(group.clone(), total));
        }
    }
    Ok(())
}

pub fn validate_service_input(input: &ServiceCreateInput) -> Result<(), ValidationError> {
    validate_name("name", &input.name)?;
    if let Some(id) = &input.id {
        validate_name("id", id)?;
    }
    Ok(())
}

pub fn validate_llm_model_input(input: &LlmModelCreateInput) -> Result<(), ValidationError> {
    validate_name("name", &input.name)?;
    validate_name("provider", &input.provider)?;
    validate_cost("inputCost", input.input_cost)?;
    validate_cost("outputCost", input.output_cost)?;
    Ok(())
}

pub fn validate_agent_input(input: &AgentCreateInput) -> Result<(), ValidationError> {
    validate_name("title", &input.title)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(version) = &input.version {
        validate_name("version", version)?;
    }
    Ok(())
}

/// Validate only the fields an update actually sets
pub fn validate_agent_update(input: &AgentUpdateInput) -> Result<(), ValidationError> {
    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }
    if let Some(version) = &input.version {
        validate_name("version", version)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(total_cost) = input.total_cost {
        validate_cost("totalCost", total_cost)?;
    }
    if let Some(services_cost) = input.services_cost {
        validate_cost("servicesCost", services_cost)?;
    }
    if let Some(llm_cost) = input.llm_cost {
        validate_cost("llmCost", llm_cost)?;
    }
    if let Some(scores) = &input.scores {
        validate_scores(scores)?;
    }
    if let Some(distribution) = &input.categories_distribution {
        validate_distribution(distribution)?;
    }
    if let Some(roi_inputs) = &input.roi_inputs {
        roi_inputs.validate()?;
    }
    Ok(())
}
