// ABOUTME: Manifest to agent conversion and store import
// ABOUTME: The whole document is parsed and validated before anything is written

use tracing::{debug, info, warn};

use agentdash_core::{
    validate_agent_input, validate_scores, Agent, AgentCreateInput, CostAnalysis, Service,
    ServiceCategory,
};
use agentdash_storage::{Database, EntityStore};

use crate::error::{ManifestError, ManifestResult};
use crate::types::{ManifestDocument, ManifestService, MANIFEST_KIND};

pub fn parse_manifest(content: &str) -> ManifestResult<ManifestDocument> {
    serde_json::from_str(content).map_err(ManifestError::parse)
}

/// Build a new agent (fresh id, inactive) from a parsed manifest.
///
/// Services are resolved against `known_services` by id; unknown ones are
/// created from the manifest entry with empty cost fields.
pub fn agent_from_manifest(
    document: ManifestDocument,
    known_services: &[Service],
) -> ManifestResult<Agent> {
    let manifest = document.manifest;

    if manifest.kind.kind_type != MANIFEST_KIND {
        warn!(
            "Importing manifest with unexpected kind '{}'",
            manifest.kind.kind_type
        );
    }

    let create = AgentCreateInput {
        title: manifest.metadata.title,
        version: Some(manifest.metadata.version),
        subtitle: None,
        description: Some(manifest.metadata.description),
        logo: None,
        prompt: if manifest.prompt.is_empty() {
            None
        } else {
            Some(manifest.prompt)
        },
        llms: ordered_llms(
            manifest
                .configuration
                .llms
                .into_iter()
                .map(|llm| llm.name)
                .collect(),
            &manifest.configuration.primary_llm,
        ),
        tags: manifest.metadata.tags,
    };
    validate_agent_input(&create)?;
    validate_scores(&manifest.performance.scores)?;

    let cost_analysis = CostAnalysis::new(manifest.performance.roi)?;
    let services = manifest
        .configuration
        .services
        .iter()
        .map(|entry| resolve_service(entry, known_services))
        .collect::<ManifestResult<Vec<_>>>()?;

    let mut agent = Agent::from_create_input(create);
    agent.scores = manifest.performance.scores;
    agent.nodes = manifest.configuration.nodes;
    agent.services = services;
    agent.cost_analysis = Some(cost_analysis);

    Ok(agent)
}

/// Primary model first, without duplicates
fn ordered_llms(mut llms: Vec<String>, primary: &str) -> Vec<String> {
    if primary.is_empty() {
        return llms;
    }
    llms.retain(|name| name != primary);
    llms.insert(0, primary.to_string());
    llms
}

fn resolve_service(entry: &ManifestService, known: &[Service]) -> ManifestResult<Service> {
    let category: ServiceCategory = entry.category.parse().map_err(|_| {
        ManifestError::Invalid(format!(
            "service '{}' has unknown category '{}'",
            entry.id, entry.category
        ))
    })?;

    if let Some(service) = known.iter().find(|s| s.id == entry.id) {
        debug!("Manifest service {} matched existing service", entry.id);
        return Ok(service.clone());
    }

    debug!("Manifest service {} not in store; using manifest copy", entry.id);
    Ok(Service {
        id: entry.id.clone(),
        name: entry.name.clone(),
        category,
        cost_structure: String::new(),
        cost_per_unit: String::new(),
        has_freetier: false,
        logo: None,
    })
}

/// Parse `content` and add the resulting agent to `agents`.
///
/// Nothing is written unless parsing and conversion both succeed.
pub async fn import_manifest<A, S>(agents: &A, services: &S, content: &str) -> ManifestResult<Agent>
where
    A: EntityStore<Agent> + ?Sized,
    S: EntityStore<Service> + ?Sized,
{
    let document = parse_manifest(content)?;
    let known_services = services.get_all().await?;
    let agent = agent_from_manifest(document, &known_services)?;

    let added = agents.add(agent).await?;
    info!("Imported agent {} ({}) from manifest", added.title, added.id);
    Ok(added)
}

pub async fn import_into_database(db: &Database, content: &str) -> ManifestResult<Agent> {
    import_manifest(&db.agents, &db.services, content).await
}
