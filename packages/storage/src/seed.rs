// ABOUTME: Mock seed data for a fresh dashboard
// ABOUTME: JSON files under config/ are embedded at compile time and parsed on demand

use serde::{Deserialize, Serialize};

use agentdash_core::{Agent, LlmModelDetails, Service};

use crate::StorageResult;

const AGENTS_JSON: &str = include_str!("../config/agents.json");
const SERVICES_JSON: &str = include_str!("../config/services.json");
const LLM_MODELS_JSON: &str = include_str!("../config/llm_models.json");

#[derive(Debug, Deserialize)]
struct AgentsSeed {
    #[allow(dead_code)]
    version: String,
    agents: Vec<Agent>,
}

#[derive(Debug, Deserialize)]
struct ServicesSeed {
    #[allow(dead_code)]
    version: String,
    services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
struct LlmModelsSeed {
    #[allow(dead_code)]
    version: String,
    models: Vec<LlmModelDetails>,
}

/// Parsed seed collections, ready to be loaded into a [`crate::Database`].
/// Also the shape of a saved snapshot of all stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub agents: Vec<Agent>,
    pub services: Vec<Service>,
    pub llm_models: Vec<LlmModelDetails>,
}

impl SeedData {
    pub fn load() -> StorageResult<Self> {
        let agents: AgentsSeed = serde_json::from_str(AGENTS_JSON)?;
        let services: ServicesSeed = serde_json::from_str(SERVICES_JSON)?;
        let llm_models: LlmModelsSeed = serde_json::from_str(LLM_MODELS_JSON)?;

        Ok(Self {
            agents: agents.agents,
            services: services.services,
            llm_models: llm_models.models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loads() {
        let seed = SeedData::load().expect("Seed data should parse");
        assert!(!seed.agents.is_empty(), "Should have agents");
        assert!(!seed.services.is_empty(), "Should have services");
        assert!(!seed.llm_models.is_empty(), "Should have LLM models");
    }

    #[test]
    fn test_seed_cost_analysis_is_derived() {
        let seed = SeedData::load().unwrap();
        let support = seed
            .agents
            .iter()
            .find(|a| a.id == "agent-support")
            .unwrap();
        assert_eq!(support.roi(), Some(333));
    }

    #[test]
    fn test_seed_agent_llms_exist_in_models() {
        let seed = SeedData::load().unwrap();
        for agent in &seed.agents {
            for llm in &agent.llms {
                assert!(
                    seed.llm_models.iter().any(|m| &m.name == llm),
                    "Agent {} references unknown model {}",
                    agent.id,
                    llm
                );
            }
        }
    }
}
