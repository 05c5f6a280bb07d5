// ABOUTME: Service store operations
// ABOUTME: Category and name lookups over the generic store

use agentdash_core::{Service, ServiceCategory, ServiceUpdateInput, ValidationError};

use crate::store::{Entity, InMemoryStore};

pub type ServiceStore = InMemoryStore<Service>;

impl Entity for Service {
    type Patch = ServiceUpdateInput;
    const KIND: &'static str = "Service";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: ServiceUpdateInput) -> Result<(), ValidationError> {
        self.apply_update(patch);
        Ok(())
    }
}

impl InMemoryStore<Service> {
    pub async fn list_by_category(&self, category: ServiceCategory) -> Vec<Service> {
        self.filter(|service| service.category == category).await
    }

    /// Case-insensitive exact name match
    pub async fn find_by_name(&self, name: &str) -> Option<Service> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|service| service.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}
