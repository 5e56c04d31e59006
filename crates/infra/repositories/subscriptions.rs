use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::{
    domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::subscriptions::SubscriptionRepository,
    },
    infra::storage::{self, SharedStore, keys},
};

pub struct SubscriptionLocalStorage {
    store: SharedStore,
}

impl SubscriptionLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionLocalStorage {
    async fn load_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let subscriptions: Vec<SubscriptionEntity> =
            storage::read_json(&self.store, keys::SUBSCRIPTIONS)
                .await?
                .unwrap_or_default();
        debug!(count = subscriptions.len(), "subscriptions: loaded from storage");
        Ok(subscriptions)
    }

    async fn save_all(&self, subscriptions: &[SubscriptionEntity]) -> Result<()> {
        storage::write_json(&self.store, keys::SUBSCRIPTIONS, subscriptions).await?;
        debug!(count = subscriptions.len(), "subscriptions: written to storage");
        Ok(())
    }
}
