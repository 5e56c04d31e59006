use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::events::{FeedbackEventEntity, ShareEventEntity};

/// Append-only event logs. The core never reads them back for decisions.
#[async_trait]
#[automock]
pub trait EventLogRepository {
    async fn append_feedback(&self, event: FeedbackEventEntity) -> Result<usize>;
    async fn append_share(&self, event: ShareEventEntity) -> Result<usize>;
}
