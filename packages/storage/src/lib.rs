// ABOUTME: Data layer for Agentdash
// ABOUTME: Generic async entity store, typed agent/service/model stores, and the Database handle

use agentdash_core::ValidationError;
use thiserror::Error;

pub mod agents;
pub mod database;
pub mod llm_models;
pub mod seed;
pub mod services;
pub mod store;

pub use agents::AgentStore;
pub use database::{DashboardSummary, Database};
pub use llm_models::LlmModelStore;
pub use seed::SeedData;
pub use services::ServiceStore;
pub use store::{Entity, EntityStore, InMemoryStore};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
