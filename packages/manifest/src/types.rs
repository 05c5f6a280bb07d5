// ABOUTME: Agent manifest document structure
// ABOUTME: Field names match exported manifest files exactly and must not change

use serde::{Deserialize, Serialize};

use agentdash_core::{AgentNode, RoiInputs, Scores};

/// Value written to `kind.type` on export
pub const MANIFEST_KIND: &str = "agent";

/// Top-level document: everything lives under a single `manifest` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub manifest: Manifest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: ManifestMetadata,
    #[serde(default)]
    pub kind: ManifestKind,
    #[serde(default)]
    pub configuration: ManifestConfiguration,
    #[serde(default)]
    pub performance: ManifestPerformance,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub version: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestKind {
    #[serde(rename = "type")]
    pub kind_type: String,
}

impl Default for ManifestKind {
    fn default() -> Self {
        Self {
            kind_type: MANIFEST_KIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfiguration {
    #[serde(default)]
    pub llms: Vec<ManifestLlm>,
    #[serde(default)]
    pub primary_llm: String,
    #[serde(default)]
    pub nodes: Vec<AgentNode>,
    #[serde(default)]
    pub services: Vec<ManifestService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestLlm {
    pub name: String,
}

/// Category stays a string here so an unknown value becomes a manifest
/// validation error instead of a parse error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestService {
    pub id: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestPerformance {
    #[serde(default)]
    pub scores: Scores,
    #[serde(default)]
    pub roi: RoiInputs,
}
