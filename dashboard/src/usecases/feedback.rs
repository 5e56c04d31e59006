use std::sync::Arc;

use subcentral::domain::{
    clock::Clock,
    entities::events::{FeedbackEventEntity, ShareEventEntity},
    repositories::events::EventLogRepository,
    value_objects::enums::share_platforms::SharePlatform,
};
use thiserror::Error;
use tracing::info;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("unknown share platform: {0}")]
    UnknownPlatform(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Write-only feedback and share logs.
pub struct FeedbackUseCase<E>
where
    E: EventLogRepository + Send + Sync + 'static,
{
    event_log_repository: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<E> FeedbackUseCase<E>
where
    E: EventLogRepository + Send + Sync + 'static,
{
    pub fn new(event_log_repository: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            event_log_repository,
            clock,
        }
    }

    /// Returns how many feedback entries are stored after this one.
    pub async fn submit_feedback(&self, rating: u8, text: &str) -> Result<usize, FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }

        let total = self
            .event_log_repository
            .append_feedback(FeedbackEventEntity {
                rating,
                text: text.trim().to_string(),
                timestamp: self.clock.now(),
            })
            .await?;

        info!(rating, total, "feedback: submitted");
        Ok(total)
    }

    pub async fn log_share(&self, platform: SharePlatform) -> Result<usize, FeedbackError> {
        let total = self
            .event_log_repository
            .append_share(ShareEventEntity {
                platform,
                timestamp: self.clock.now(),
            })
            .await?;

        info!(%platform, total, "feedback: share logged");
        Ok(total)
    }

    pub async fn log_share_by_name(&self, platform: &str) -> Result<usize, FeedbackError> {
        let platform = SharePlatform::from_str(platform)
            .ok_or_else(|| FeedbackError::UnknownPlatform(platform.to_string()))?;
        self.log_share(platform).await
    }
}
