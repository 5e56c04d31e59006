use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::{
    domain::{repositories::tiers::TierRepository, value_objects::enums::plans::Plan},
    infra::storage::{SharedStore, keys},
};

/// The tier slot holds the bare plan id (`basic`, `premium`, `premiumPlus`), not JSON.
pub struct TierLocalStorage {
    store: SharedStore,
}

impl TierLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TierRepository for TierLocalStorage {
    async fn load_plan(&self) -> Result<Option<Plan>> {
        let Some(raw) = self.store.get(keys::TIER).await? else {
            return Ok(None);
        };

        // Tolerate a JSON-quoted id as well.
        let plan = Plan::from_str(raw.trim().trim_matches('"'));
        if plan.is_none() {
            warn!(stored = %raw, "tiers: ignoring unknown plan id");
        }
        Ok(plan)
    }

    async fn save_plan(&self, plan: Plan) -> Result<()> {
        self.store.set(keys::TIER, plan.as_str()).await
    }
}
