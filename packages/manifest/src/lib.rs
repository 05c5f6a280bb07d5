// ABOUTME: Portable agent manifests for Agentdash
// ABOUTME: Export agents to manifest documents and import them back into the store

pub mod error;
pub mod export;
pub mod file;
pub mod import;
pub mod types;

// Re-export main types
pub use error::{ManifestError, ManifestResult};
pub use export::{export_agent, export_agent_string, to_manifest_string};
pub use file::{manifest_file_name, read_manifest_file, write_manifest_file, MANIFEST_EXTENSION};
pub use import::{agent_from_manifest, import_into_database, import_manifest, parse_manifest};
pub use types::{
    Manifest, ManifestConfiguration, ManifestDocument, ManifestKind, ManifestLlm,
    ManifestMetadata, ManifestPerformance, ManifestService, MANIFEST_KIND,
};
