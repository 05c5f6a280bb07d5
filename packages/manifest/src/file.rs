// ABOUTME: Manifest file naming and disk I/O
// ABOUTME: Files keep the .yml extension while their content is JSON

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use agentdash_core::{slugify, Agent};

use crate::error::ManifestResult;
use crate::export::export_agent_string;

/// Extension used for exported manifests. The content is JSON regardless.
pub const MANIFEST_EXTENSION: &str = "yml";

const ACCEPTED_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// `<slugified title>.yml`
pub fn manifest_file_name(agent: &Agent) -> String {
    format!("{}.{}", slugify(&agent.title), MANIFEST_EXTENSION)
}

/// Export `agent` into `dir` and return the written path
pub async fn write_manifest_file(dir: impl AsRef<Path>, agent: &Agent) -> ManifestResult<PathBuf> {
    let path = dir.as_ref().join(manifest_file_name(agent));
    let content = export_agent_string(agent)?;
    fs::write(&path, content).await?;
    info!("Wrote manifest for agent {} to {}", agent.id, path.display());
    Ok(path)
}

pub async fn read_manifest_file(path: impl AsRef<Path>) -> ManifestResult<String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    if !extension
        .as_deref()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
    {
        warn!(
            "Manifest {} does not have a .yml extension; reading it anyway",
            path.display()
        );
    }

    Ok(fs::read_to_string(path).await?)
}
