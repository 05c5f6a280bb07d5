// ABOUTME: Application-wide handle bundling the agent, service, and LLM model stores
// ABOUTME: Built once at startup and passed by reference; also computes dashboard summaries

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use agentdash_core::{Agent, AgentUpdateInput, ServiceCategory};

use crate::seed::SeedData;
use crate::store::{Entity, EntityStore, InMemoryStore};
use crate::{AgentStore, LlmModelStore, ServiceStore, StorageError, StorageResult};

#[derive(Debug, Default)]
pub struct Database {
    pub agents: AgentStore,
    pub services: ServiceStore,
    pub llm_models: LlmModelStore,
}

/// Aggregates rendered by the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_agents: usize,
    pub active_agents: usize,
    pub total_cost: f64,
    /// Mean ROI over agents that have a cost analysis; 0 when none do
    pub average_roi: f64,
    pub services_by_category: BTreeMap<ServiceCategory, usize>,
}

impl Database {
    /// Empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores pre-populated with the embedded mock data
    pub async fn seeded() -> StorageResult<Self> {
        let db = Self::new();
        db.load(SeedData::load()?).await?;
        Ok(db)
    }

    /// Insert every record of `seed`.
    ///
    /// All ids are checked against the stores and each other first; on a
    /// duplicate nothing is inserted.
    pub async fn load(&self, seed: SeedData) -> StorageResult<()> {
        check_new_ids(&self.services, &seed.services).await?;
        check_new_ids(&self.llm_models, &seed.llm_models).await?;
        check_new_ids(&self.agents, &seed.agents).await?;

        let counts = (seed.agents.len(), seed.services.len(), seed.llm_models.len());

        for service in seed.services {
            self.services.add(service).await?;
        }
        for model in seed.llm_models {
            self.llm_models.add(model).await?;
        }
        for agent in seed.agents {
            self.agents.add(agent).await?;
        }

        info!(
            "Loaded {} agents, {} services, {} LLM models",
            counts.0, counts.1, counts.2
        );
        Ok(())
    }

    /// Stores populated from a previously saved snapshot
    pub async fn from_snapshot(snapshot: SeedData) -> StorageResult<Self> {
        let db = Self::new();
        db.load(snapshot).await?;
        Ok(db)
    }

    /// Copy of every store, in the same shape as the seed data
    pub async fn snapshot(&self) -> StorageResult<SeedData> {
        Ok(SeedData {
            agents: self.agents.get_all().await?,
            services: self.services.get_all().await?,
            llm_models: self.llm_models.get_all().await?,
        })
    }

    /// Re-copy the agent's embedded services from the live service store.
    ///
    /// Agents hold copies, so edits to a service are not visible on the agent
    /// until this runs. Copies whose service was deleted are kept as they are.
    pub async fn refresh_agent_services(&self, agent_id: &str) -> StorageResult<Agent> {
        let agent = self.agents.require(agent_id).await?;

        let mut refreshed = Vec::with_capacity(agent.services.len());
        for copy in agent.services {
            match self.services.get_by_id(&copy.id).await? {
                Some(live) => refreshed.push(live),
                None => {
                    debug!(
                        "Service {} on agent {} no longer exists; keeping stored copy",
                        copy.id, agent_id
                    );
                    refreshed.push(copy);
                }
            }
        }

        self.agents
            .update(
                agent_id,
                AgentUpdateInput {
                    services: Some(refreshed),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn summary(&self) -> StorageResult<DashboardSummary> {
        let agents = self.agents.get_all().await?;
        let services = self.services.get_all().await?;

        let active_agents = agents.iter().filter(|a| a.is_active).count();
        let total_cost = agents.iter().map(|a| a.total_cost).sum();

        let rois: Vec<i64> = agents.iter().filter_map(Agent::roi).collect();
        let average_roi = if rois.is_empty() {
            0.0
        } else {
            rois.iter().sum::<i64>() as f64 / rois.len() as f64
        };

        let mut services_by_category = BTreeMap::new();
        for service in &services {
            *services_by_category.entry(service.category).or_insert(0) += 1;
        }

        Ok(DashboardSummary {
            total_agents: agents.len(),
            active_agents,
            total_cost,
            average_roi,
            services_by_category,
        })
    }
}

async fn check_new_ids<T: Entity>(store: &InMemoryStore<T>, incoming: &[T]) -> StorageResult<()> {
    let existing = store.get_all().await?;
    let mut seen: HashSet<&str> = existing.iter().map(|item| item.id()).collect();
    for item in incoming {
        if !seen.insert(item.id()) {
            return Err(StorageError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdash_core::{Service, ServiceCreateInput};
    use pretty_assertions::assert_eq;

    fn service(id: &str) -> Service {
        Service::from_create_input(ServiceCreateInput {
            id: Some(id.to_string()),
            name: format!("Service {}", id),
            category: ServiceCategory::Integrations,
            cost_structure: String::new(),
            cost_per_unit: String::new(),
            has_freetier: false,
            logo: None,
        })
    }

    #[tokio::test]
    async fn test_load_with_duplicate_inserts_nothing() {
        let db = Database::new();
        let mut seed = SeedData::load().unwrap();
        seed.services.push(service("svc-extra"));
        seed.services.push(service("svc-extra"));

        let err = db.load(seed).await.unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId { ref id, .. } if id == "svc-extra"));
        assert_eq!(db.services.count().await.unwrap(), 0);
        assert_eq!(db.llm_models.count().await.unwrap(), 0);
        assert_eq!(db.agents.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_load_conflicting_with_existing_record_inserts_nothing() {
        let db = Database::new();
        db.services.add(service("svc-zapier")).await.unwrap();

        let err = db.load(SeedData::load().unwrap()).await.unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId { kind: "Service", .. }));
        assert_eq!(db.services.count().await.unwrap(), 1);
        assert_eq!(db.agents.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let db = Database::seeded().await.unwrap();
        db.services.add(service("svc-new")).await.unwrap();
        db.agents.set_active("agent-research", true).await.unwrap();

        let json = serde_json::to_string(&db.snapshot().await.unwrap()).unwrap();
        let restored = Database::from_snapshot(serde_json::from_str(&json).unwrap())
            .await
            .unwrap();

        let ids = |snapshot: SeedData| {
            (
                snapshot.agents.into_iter().map(|a| a.id).collect::<Vec<_>>(),
                snapshot.services.into_iter().map(|s| s.id).collect::<Vec<_>>(),
                snapshot.llm_models.into_iter().map(|m| m.id).collect::<Vec<_>>(),
            )
        };
        assert_eq!(
            ids(restored.snapshot().await.unwrap()),
            ids(db.snapshot().await.unwrap())
        );
        assert!(restored.agents.require("agent-research").await.unwrap().is_active);
        assert_eq!(restored.services.count().await.unwrap(), 8);
    }
}
