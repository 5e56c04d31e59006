use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::enums::plans::Plan;

#[async_trait]
#[automock]
pub trait TierRepository {
    /// The stored plan, or `None` when nothing valid is stored.
    async fn load_plan(&self) -> Result<Option<Plan>>;
    async fn save_plan(&self, plan: Plan) -> Result<()>;
}
