use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::SubscriptionEntity;

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Reads the persisted collection. Corrupt data yields an empty list.
    async fn load_all(&self) -> Result<Vec<SubscriptionEntity>>;

    /// Replaces the persisted collection with `subscriptions`.
    async fn save_all(&self, subscriptions: &[SubscriptionEntity]) -> Result<()>;
}
