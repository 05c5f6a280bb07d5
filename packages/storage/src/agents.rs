// ABOUTME: Agent store operations
// ABOUTME: Activation, cost analysis recomputation, and session history on top of the generic store

use tracing::{debug, info};

use agentdash_core::{Agent, AgentSession, AgentUpdateInput, RoiInputs, ValidationError};

use crate::store::{Entity, EntityStore, InMemoryStore};
use crate::StorageResult;

pub type AgentStore = InMemoryStore<Agent>;

impl Entity for Agent {
    type Patch = AgentUpdateInput;
    const KIND: &'static str = "Agent";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: AgentUpdateInput) -> Result<(), ValidationError> {
        self.apply_update(patch)
    }
}

impl InMemoryStore<Agent> {
    pub async fn list_active(&self) -> Vec<Agent> {
        self.filter(|agent| agent.is_active).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> StorageResult<Agent> {
        info!("Setting agent {} active = {}", id, is_active);
        self.update(
            id,
            AgentUpdateInput {
                is_active: Some(is_active),
                ..Default::default()
            },
        )
        .await
    }

    /// Replace the ROI inputs of an agent; the derived values are recomputed
    pub async fn update_cost_analysis(&self, id: &str, inputs: RoiInputs) -> StorageResult<Agent> {
        let agent = self
            .update(
                id,
                AgentUpdateInput {
                    roi_inputs: Some(inputs),
                    ..Default::default()
                },
            )
            .await?;
        debug!("Agent {} ROI is now {:?}%", id, agent.roi());
        Ok(agent)
    }

    /// Append a finished run to the agent's history
    pub async fn record_session(&self, id: &str, session: AgentSession) -> StorageResult<Agent> {
        debug!("Recording session {} for agent {}", session.id, id);
        self.modify(id, |agent| {
            agent.sessions.push(session);
            Ok(())
        })
        .await
    }
}
