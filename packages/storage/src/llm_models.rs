// ABOUTME: LLM model store operations
// ABOUTME: Provider and name lookups over the generic store

use agentdash_core::{LlmModelDetails, LlmModelUpdateInput, ValidationError};

use crate::store::{Entity, InMemoryStore};

pub type LlmModelStore = InMemoryStore<LlmModelDetails>;

impl Entity for LlmModelDetails {
    type Patch = LlmModelUpdateInput;
    const KIND: &'static str = "LLM model";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: LlmModelUpdateInput) -> Result<(), ValidationError> {
        self.apply_update(patch);
        Ok(())
    }
}

impl InMemoryStore<LlmModelDetails> {
    /// Models from one provider, matched case-insensitively
    pub async fn list_by_provider(&self, provider: &str) -> Vec<LlmModelDetails> {
        let provider = provider.to_lowercase();
        self.filter(move |model| model.provider.to_lowercase() == provider)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Option<LlmModelDetails> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|model| model.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}
