use std::sync::Arc;

use subcentral::domain::{
    repositories::tiers::TierRepository,
    value_objects::{
        enums::plans::Plan,
        plans::{self, DEFAULT_PLAN, Feature, TierDto, TierLimits},
    },
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TierError {
    #[error("{feature} is not included in the {plan} plan")]
    EntitlementDenied { feature: Feature, plan: Plan },
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Current plan of the session plus the entitlement checks derived from it.
pub struct TierUseCase<T>
where
    T: TierRepository + Send + Sync + 'static,
{
    tier_repository: Arc<T>,
    plan: RwLock<Plan>,
}

impl<T> TierUseCase<T>
where
    T: TierRepository + Send + Sync + 'static,
{
    /// Reads the stored plan; anything missing or unreadable starts on the default plan.
    pub async fn load(tier_repository: Arc<T>) -> Result<Self, TierError> {
        let plan = match tier_repository.load_plan().await? {
            Some(plan) => plan,
            None => {
                debug!(plan = %DEFAULT_PLAN, "tiers: no stored plan, using default");
                DEFAULT_PLAN
            }
        };

        Ok(Self {
            tier_repository,
            plan: RwLock::new(plan),
        })
    }

    pub async fn current_plan(&self) -> Plan {
        *self.plan.read().await
    }

    pub async fn current_tier(&self) -> TierDto {
        TierDto::from(self.current_plan().await)
    }

    pub async fn limits(&self) -> TierLimits {
        TierLimits::for_plan(self.current_plan().await)
    }

    /// Swaps the plan immediately. Existing subscriptions above a lower ceiling are kept.
    pub async fn set_plan(&self, plan: Plan) -> Result<TierDto, TierError> {
        let mut current = self.plan.write().await;
        self.tier_repository.save_plan(plan).await.map_err(|err| {
            warn!(plan = %plan, db_error = ?err, "tiers: failed to persist plan");
            err
        })?;

        info!(from = %*current, to = %plan, "tiers: plan changed");
        *current = plan;
        Ok(TierDto::from(plan))
    }

    pub async fn set_plan_by_id(&self, plan_id: &str) -> Result<TierDto, TierError> {
        let plan =
            Plan::from_str(plan_id).ok_or_else(|| TierError::UnknownPlan(plan_id.to_string()))?;
        self.set_plan(plan).await
    }

    pub async fn can_add(&self, current_count: usize) -> bool {
        self.limits().await.can_add(current_count)
    }

    pub async fn ensure_feature(&self, feature: Feature) -> Result<(), TierError> {
        let plan = self.current_plan().await;
        if TierLimits::for_plan(plan).allows(feature) {
            return Ok(());
        }

        debug!(%plan, %feature, "tiers: feature locked for plan");
        Err(TierError::EntitlementDenied { feature, plan })
    }

    pub fn all_tiers(&self) -> Vec<TierDto> {
        plans::all_tiers()
    }
}
