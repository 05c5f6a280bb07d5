// ABOUTME: Agent to manifest conversion
// ABOUTME: Produces the portable document written to .yml files (JSON content)

use tracing::info;

use agentdash_core::Agent;

use crate::error::{ManifestError, ManifestResult};
use crate::types::{
    Manifest, ManifestConfiguration, ManifestDocument, ManifestKind, ManifestLlm,
    ManifestMetadata, ManifestPerformance, ManifestService,
};

pub fn export_agent(agent: &Agent) -> ManifestDocument {
    let roi = agent
        .cost_analysis
        .as_ref()
        .map(|analysis| *analysis.inputs())
        .unwrap_or_default();

    ManifestDocument {
        manifest: Manifest {
            metadata: ManifestMetadata {
                version: agent.version.clone(),
                title: agent.title.clone(),
                description: agent.description.clone(),
                tags: agent.tags.clone(),
            },
            kind: ManifestKind::default(),
            configuration: ManifestConfiguration {
                llms: agent
                    .llms
                    .iter()
                    .map(|name| ManifestLlm { name: name.clone() })
                    .collect(),
                primary_llm: agent.primary_llm().unwrap_or_default().to_string(),
                nodes: agent.nodes.clone(),
                services: agent
                    .services
                    .iter()
                    .map(|service| ManifestService {
                        id: service.id.clone(),
                        name: service.name.clone(),
                        category: service.category.as_str().to_string(),
                    })
                    .collect(),
            },
            performance: ManifestPerformance {
                scores: agent.scores,
                roi,
            },
            prompt: agent.prompt.clone().unwrap_or_default(),
        },
    }
}

/// Pretty-printed JSON, the content format of exported `.yml` files
pub fn to_manifest_string(document: &ManifestDocument) -> ManifestResult<String> {
    serde_json::to_string_pretty(document).map_err(|e| ManifestError::Encode(e.to_string()))
}

pub fn export_agent_string(agent: &Agent) -> ManifestResult<String> {
    info!("Exporting manifest for agent {}", agent.id);
    to_manifest_string(&export_agent(agent))
}
