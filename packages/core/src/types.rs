// ABOUTME: Domain type definitions for agents, services, and LLM models
// ABOUTME: Entities plus the create/update inputs the dashboard forms submit

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cost::{CostAnalysis, RoiInputs};
use crate::utils::generate_id;
use crate::validation::ValidationError;

/// Category group -> (category -> percentage)
pub type CategoriesDistribution = BTreeMap<String, BTreeMap<String, f64>>;

const COST_EPSILON: f64 = 1e-9;

/// Closed set of service categories, serialized with their display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "INTEGRATIONS")]
    Integrations,
    #[serde(rename = "REASONING")]
    Reasoning,
    #[serde(rename = "DB")]
    Db,
    #[serde(rename = "DOCUMENT COMPOSITION")]
    DocumentComposition,
    #[serde(rename = "SCRAPING - CRAWLING")]
    ScrapingCrawling,
    #[serde(rename = "LLM PROVIDER")]
    LlmProvider,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Integrations,
        ServiceCategory::Reasoning,
        ServiceCategory::Db,
        ServiceCategory::DocumentComposition,
        ServiceCategory::ScrapingCrawling,
        ServiceCategory::LlmProvider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Integrations => "INTEGRATIONS",
            ServiceCategory::Reasoning => "REASONING",
            ServiceCategory::Db => "DB",
            ServiceCategory::DocumentComposition => "DOCUMENT COMPOSITION",
            ServiceCategory::ScrapingCrawling => "SCRAPING - CRAWLING",
            ServiceCategory::LlmProvider => "LLM PROVIDER",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownServiceCategory(pub String);

impl fmt::Display for UnknownServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service category: {}", self.0)
    }
}

impl std::error::Error for UnknownServiceCategory {}

impl From<UnknownServiceCategory> for ValidationError {
    fn from(err: UnknownServiceCategory) -> Self {
        ValidationError::InvalidCategory(err.0)
    }
}

impl FromStr for ServiceCategory {
    type Err = UnknownServiceCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ServiceCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownServiceCategory(s.to_string()))
    }
}

/// Third-party API or tool an agent depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub cost_structure: String,
    /// Free text such as "$0.002 / request"; never used in arithmetic
    #[serde(default)]
    pub cost_per_unit: String,
    #[serde(default)]
    pub has_freetier: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Service {
    pub fn from_create_input(input: ServiceCreateInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(|| generate_id("service")),
            name: input.name,
            category: input.category,
            cost_structure: input.cost_structure,
            cost_per_unit: input.cost_per_unit,
            has_freetier: input.has_freetier,
            logo: input.logo,
        }
    }

    pub fn apply_update(&mut self, input: ServiceUpdateInput) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        if let Some(cost_structure) = input.cost_structure {
            self.cost_structure = cost_structure;
        }
        if let Some(cost_per_unit) = input.cost_per_unit {
            self.cost_per_unit = cost_per_unit;
        }
        if let Some(has_freetier) = input.has_freetier {
            self.has_freetier = has_freetier;
        }
        if let Some(logo) = input.logo {
            self.logo = Some(logo);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreateInput {
    /// Caller-chosen id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub cost_structure: String,
    #[serde(default)]
    pub cost_per_unit: String,
    #[serde(default)]
    pub has_freetier: bool,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdateInput {
    pub name: Option<String>,
    pub category: Option<ServiceCategory>,
    pub cost_structure: Option<String>,
    pub cost_per_unit: Option<String>,
    pub has_freetier: Option<bool>,
    pub logo: Option<String>,
}

/// Language model pricing and qualitative notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmModelDetails {
    pub id: String,
    pub name: String,
    pub provider: String,
    /// Currency per input token
    pub input_cost: f64,
    /// Currency per output token
    pub output_cost: f64,
    /// Free text such as "128k tokens"
    #[serde(default)]
    pub max_context: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl LlmModelDetails {
    pub fn from_create_input(input: LlmModelCreateInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(|| generate_id("llm")),
            name: input.name,
            provider: input.provider,
            input_cost: input.input_cost,
            output_cost: input.output_cost,
            max_context: input.max_context,
            strengths: input.strengths,
            limitations: input.limitations,
            logo: input.logo,
        }
    }

    /// Cost of a single call with the given token counts
    pub fn estimate_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        input_tokens as f64 * self.input_cost + output_tokens as f64 * self.output_cost
    }

    pub fn apply_update(&mut self, input: LlmModelUpdateInput) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(provider) = input.provider {
            self.provider = provider;
        }
        if let Some(input_cost) = input.input_cost {
            self.input_cost = input_cost;
        }
        if let Some(output_cost) = input.output_cost {
            self.output_cost = output_cost;
        }
        if let Some(max_context) = input.max_context {
            self.max_context = max_context;
        }
        if let Some(strengths) = input.strengths {
            self.strengths = strengths;
        }
        if let Some(limitations) = input.limitations {
            self.limitations = limitations;
        }
        if let Some(logo) = input.logo {
            self.logo = Some(logo);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmModelCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub provider: String,
    pub input_cost: f64,
    pub output_cost: f64,
    #[serde(default)]
    pub max_context: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmModelUpdateInput {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub input_cost: Option<f64>,
    pub output_cost: Option<f64>,
    pub max_context: Option<String>,
    pub strengths: Option<Vec<String>>,
    pub limitations: Option<Vec<String>>,
    pub logo: Option<String>,
}

/// Nominal 0-5 ratings shown on the agent card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub quality: f64,
    pub speed: f64,
    pub saving: f64,
    pub privacy: f64,
}

/// Sub-task of an agent pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Name of the LLM this node runs on
    pub llm: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Completed,
    Failed,
    Cancelled,
}

/// One historical run of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub cost: f64,
    #[serde(default)]
    pub tokens_used: u64,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub services_cost: f64,
    #[serde(default)]
    pub llm_cost: f64,
    #[serde(default)]
    pub categories_distribution: CategoriesDistribution,
    #[serde(default)]
    pub scores: Scores,
    /// Copies of the services taken when they were attached; edits to the
    /// live service do not reach these until refreshed
    #[serde(default)]
    pub services: Vec<Service>,
    /// LLM model names, primary model first
    #[serde(default)]
    pub llms: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<AgentNode>,
    #[serde(default)]
    pub sessions: Vec<AgentSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Agent {
    /// Build a fresh, inactive agent from the "new agent" form
    pub fn from_create_input(input: AgentCreateInput) -> Self {
        Self {
            id: generate_id("agent"),
            title: input.title,
            version: input.version.unwrap_or_else(|| "1.0.0".to_string()),
            subtitle: input.subtitle.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            logo: input.logo,
            is_active: false,
            total_cost: 0.0,
            services_cost: 0.0,
            llm_cost: 0.0,
            categories_distribution: CategoriesDistribution::new(),
            scores: Scores::default(),
            services: Vec::new(),
            llms: input.llms,
            nodes: Vec::new(),
            sessions: Vec::new(),
            cost_analysis: None,
            prompt: input.prompt,
            tags: input.tags,
        }
    }

    /// Merge the `Some` fields of `input` into this agent.
    ///
    /// ROI inputs are turned into a fresh [`CostAnalysis`] before anything is
    /// written, so an invalid update leaves the agent untouched.
    pub fn apply_update(&mut self, input: AgentUpdateInput) -> Result<(), ValidationError> {
        let cost_analysis = input.roi_inputs.map(CostAnalysis::new).transpose()?;

        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(version) = input.version {
            self.version = version;
        }
        if let Some(subtitle) = input.subtitle {
            self.subtitle = subtitle;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(logo) = input.logo {
            self.logo = Some(logo);
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
        if let Some(total_cost) = input.total_cost {
            self.total_cost = total_cost;
        }
        if let Some(services_cost) = input.services_cost {
            self.services_cost = services_cost;
        }
        if let Some(llm_cost) = input.llm_cost {
            self.llm_cost = llm_cost;
        }
        if let Some(distribution) = input.categories_distribution {
            self.categories_distribution = distribution;
        }
        if let Some(scores) = input.scores {
            self.scores = scores;
        }
        if let Some(services) = input.services {
            self.services = services;
        }
        if let Some(llms) = input.llms {
            self.llms = llms;
        }
        if let Some(nodes) = input.nodes {
            self.nodes = nodes;
        }
        if let Some(sessions) = input.sessions {
            self.sessions = sessions;
        }
        if let Some(analysis) = cost_analysis {
            self.cost_analysis = Some(analysis);
        }
        if let Some(prompt) = input.prompt {
            self.prompt = Some(prompt);
        }
        if let Some(tags) = input.tags {
            self.tags = tags;
        }

        if !self.has_consistent_costs() {
            warn!(
                "Agent {} cost breakdown does not add up: services {} + llm {} != total {}",
                self.id, self.services_cost, self.llm_cost, self.total_cost
            );
        }

        Ok(())
    }

    /// Whether `services_cost + llm_cost` equals `total_cost`
    pub fn has_consistent_costs(&self) -> bool {
        (self.services_cost + self.llm_cost - self.total_cost).abs() < COST_EPSILON
    }

    pub fn primary_llm(&self) -> Option<&str> {
        self.llms.first().map(String::as_str)
    }

    pub fn roi(&self) -> Option<i64> {
        self.cost_analysis.as_ref().map(CostAnalysis::roi)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCreateInput {
    pub title: String,
    pub version: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub prompt: Option<String>,
    #[serde(default)]
    pub llms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial agent update. Cost analysis is only reachable through
/// `roi_inputs`, which is always recomputed on apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdateInput {
    pub title: Option<String>,
    pub version: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub is_active: Option<bool>,
    pub total_cost: Option<f64>,
    pub services_cost: Option<f64>,
    pub llm_cost: Option<f64>,
    pub categories_distribution: Option<CategoriesDistribution>,
    pub scores: Option<Scores>,
    pub services: Option<Vec<Service>>,
    pub llms: Option<Vec<String>>,
    pub nodes: Option<Vec<AgentNode>>,
    pub sessions: Option<Vec<AgentSession>>,
    pub roi_inputs: Option<RoiInputs>,
    pub prompt: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample_agent() -> Agent {
        let mut agent = Agent::from_create_input(AgentCreateInput {
            title: "Support Triage".to_string(),
            description: Some("Routes tickets".to_string()),
            llms: vec!["gpt-4o".to_string(), "claude-3-haiku".to_string()],
            ..Default::default()
        });
        agent.total_cost = 30.0;
        agent.services_cost = 10.0;
        agent.llm_cost = 20.0;
        agent
    }

    #[rstest]
    #[case("INTEGRATIONS", ServiceCategory::Integrations)]
    #[case("DB", ServiceCategory::Db)]
    #[case("document composition", ServiceCategory::DocumentComposition)]
    #[case("SCRAPING - CRAWLING", ServiceCategory::ScrapingCrawling)]
    #[case(" LLM PROVIDER ", ServiceCategory::LlmProvider)]
    fn test_service_category_from_str(#[case] input: &str, #[case] expected: ServiceCategory) {
        assert_eq!(input.parse::<ServiceCategory>().unwrap(), expected);
    }

    #[test]
    fn test_service_category_rejects_unknown() {
        let err = "VECTOR STORE".parse::<ServiceCategory>().unwrap_err();
        assert_eq!(err, UnknownServiceCategory("VECTOR STORE".to_string()));
    }

    #[test]
    fn test_service_category_wire_strings() {
        for category in ServiceCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_service_serializes_camel_case() {
        let service = Service::from_create_input(ServiceCreateInput {
            id: Some("x".to_string()),
            name: "Foo".to_string(),
            category: ServiceCategory::Db,
            cost_structure: "per request".to_string(),
            cost_per_unit: "$0.01".to_string(),
            has_freetier: true,
            logo: None,
        });

        let value = serde_json::to_value(&service).unwrap();
        assert_eq!(value["id"], "x");
        assert_eq!(value["category"], "DB");
        assert_eq!(value["hasFreetier"], true);
        assert_eq!(value["costPerUnit"], "$0.01");
        assert!(value.get("logo").is_none());
    }

    #[test]
    fn test_service_create_generates_id() {
        let service = Service::from_create_input(ServiceCreateInput {
            id: None,
            name: "Foo".to_string(),
            category: ServiceCategory::Reasoning,
            cost_structure: String::new(),
            cost_per_unit: String::new(),
            has_freetier: false,
            logo: None,
        });
        assert!(service.id.starts_with("service-"));
    }

    #[test]
    fn test_llm_estimate_cost() {
        let model = LlmModelDetails::from_create_input(LlmModelCreateInput {
            id: Some("gpt-4o".to_string()),
            name: "GPT-4o".to_string(),
            provider: "OpenAI".to_string(),
            input_cost: 0.000005,
            output_cost: 0.000015,
            max_context: "128k".to_string(),
            strengths: vec![],
            limitations: vec![],
            logo: None,
        });

        let cost = model.estimate_cost(1_000, 500);
        assert!((cost - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn test_agent_from_create_input_defaults() {
        let agent = sample_agent();

        assert!(agent.id.starts_with("agent-"));
        assert_eq!(agent.version, "1.0.0");
        assert!(!agent.is_active);
        assert!(agent.cost_analysis.is_none());
        assert_eq!(agent.primary_llm(), Some("gpt-4o"));
    }

    #[test]
    fn test_apply_update_merges_only_provided_fields() {
        let mut agent = sample_agent();
        let before = agent.clone();

        agent
            .apply_update(AgentUpdateInput {
                subtitle: Some("Tier 1".to_string()),
                is_active: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(agent.subtitle, "Tier 1");
        assert!(agent.is_active);
        assert_eq!(agent.title, before.title);
        assert_eq!(agent.description, before.description);
        assert_eq!(agent.llms, before.llms);
        assert_eq!(agent.total_cost, before.total_cost);
    }

    #[test]
    fn test_apply_update_recomputes_cost_analysis() {
        let mut agent = sample_agent();
        agent
            .apply_update(AgentUpdateInput {
                roi_inputs: Some(RoiInputs {
                    hourly_rate: 10.0,
                    session_length: 15.0,
                    manual_hourly_rate: 25.0,
                    time_saved_per_session: 20.0,
                    annual_sessions: 500.0,
                }),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(agent.roi(), Some(333));
    }

    #[test]
    fn test_apply_update_with_invalid_roi_leaves_agent_untouched() {
        let mut agent = sample_agent();
        let before = agent.clone();

        let result = agent.apply_update(AgentUpdateInput {
            title: Some("Renamed".to_string()),
            roi_inputs: Some(RoiInputs {
                hourly_rate: -5.0,
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(agent, before);
    }

    #[test]
    fn test_has_consistent_costs() {
        let mut agent = sample_agent();
        assert!(agent.has_consistent_costs());

        agent.llm_cost = 25.0;
        assert!(!agent.has_consistent_costs());
    }

    #[test]
    fn test_agent_deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"a1","title":"Minimal","version":"0.1.0"}"#;
        let agent: Agent = serde_json::from_str(json).unwrap();

        assert_eq!(agent.id, "a1");
        assert!(agent.services.is_empty());
        assert_eq!(agent.scores, Scores::default());
        assert!(agent.cost_analysis.is_none());
    }
}
