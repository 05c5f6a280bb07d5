// ABOUTME: Core domain types, cost analysis, and validation for Agentdash
// ABOUTME: Foundational package shared by storage, manifest, and CLI packages

pub mod cost;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    Agent, AgentCreateInput, AgentNode, AgentSession, AgentUpdateInput, CategoriesDistribution,
    LlmModelCreateInput, LlmModelDetails, LlmModelUpdateInput, Scores, Service,
    ServiceCategory, ServiceCreateInput, ServiceUpdateInput, SessionStatus,
    UnknownServiceCategory,
};

// Re-export cost analysis
pub use cost::{calculate_roi, CostAnalysis, CostAnalysisBuilder, RoiInputs, RoiOutcome};

// Re-export utilities
pub use utils::{generate_id, slugify};

// Re-export validation
pub use validation::{
    validate_agent_input, validate_agent_update, validate_llm_model_input, validate_scores,
    validate_service_input, ValidationError,
};
