use std::{sync::Arc, time::Duration};

use subcentral::domain::{
    clock::Clock,
    repositories::{
        subscriptions::SubscriptionRepository, tiers::TierRepository,
        usage_prompt::UsagePromptRepository,
    },
    value_objects::{
        enums::languages::Language,
        prompt_questions,
        usage::UsageSignal,
        usage_prompt::{self, PromptItem, PromptView, UsagePromptEngine},
    },
};
use thiserror::Error;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::usecases::subscriptions::{SubscriptionError, SubscriptionUseCase};

#[derive(Debug, Error)]
pub enum UsagePromptError {
    #[error("no usage prompt is in progress")]
    NotPrompting,
    #[error("usage must be between 0 and 24 hours, got {0}")]
    InvalidUsage(f64),
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// What the caller should show after an answer or a skip.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptProgress {
    Next(PromptView),
    Finished,
}

/// Drives the once-a-day usage check and writes answers into the ledger.
pub struct UsagePromptUseCase<S, T, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
    U: UsagePromptRepository + Send + Sync + 'static,
{
    usage_prompt_repository: Arc<U>,
    subscriptions: Arc<SubscriptionUseCase<S, T>>,
    clock: Arc<dyn Clock>,
    finish_delay: Duration,
    engine: Mutex<UsagePromptEngine>,
}

impl<S, T, U> UsagePromptUseCase<S, T, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
    U: UsagePromptRepository + Send + Sync + 'static,
{
    pub fn new(
        usage_prompt_repository: Arc<U>,
        subscriptions: Arc<SubscriptionUseCase<S, T>>,
        clock: Arc<dyn Clock>,
        finish_delay: Duration,
    ) -> Self {
        Self {
            usage_prompt_repository,
            subscriptions,
            clock,
            finish_delay,
            engine: Mutex::new(UsagePromptEngine::default()),
        }
    }

    pub async fn is_due(&self) -> Result<bool, UsagePromptError> {
        let done_on = self.usage_prompt_repository.load_done_date().await?;
        let active = self.subscriptions.active().await.len();
        Ok(usage_prompt::is_due(done_on, self.clock.today(), active))
    }

    /// Opens today's cycle when one is due. Also safe to call again after the
    /// ledger changes; a running cycle keeps the set it started with.
    pub async fn start(&self, language: Language) -> Result<Option<PromptView>, UsagePromptError> {
        let mut engine = self.engine.lock().await;
        if !engine.is_idle() {
            return Ok(engine.current());
        }

        let today = self.clock.today();
        let done_on = self.usage_prompt_repository.load_done_date().await?;
        let active = self.subscriptions.active().await;

        if !usage_prompt::is_due(done_on, today, active.len()) {
            debug!(
                ?done_on,
                active = active.len(),
                "usage_prompt: nothing to ask today"
            );
            return Ok(None);
        }

        let items: Vec<PromptItem> = {
            let mut rng = rand::thread_rng();
            active
                .into_iter()
                .map(|entity| PromptItem {
                    question: prompt_questions::random_question(&entity.service, language, &mut rng),
                    subscription_id: entity.id,
                    service: entity.service,
                    icon: entity.icon,
                })
                .collect()
        };

        let total = items.len();
        engine.begin(items);
        info!(total, %language, "usage_prompt: cycle started");
        Ok(engine.current())
    }

    pub async fn current(&self) -> Option<PromptView> {
        self.engine.lock().await.current()
    }

    pub async fn is_finished(&self) -> bool {
        self.engine.lock().await.is_finished()
    }

    /// Logs `hours` for the current question and moves on.
    pub async fn answer(&self, hours: f64) -> Result<PromptProgress, UsagePromptError> {
        let signal = UsageSignal::hours(hours).map_err(|_| UsagePromptError::InvalidUsage(hours))?;

        let mut engine = self.engine.lock().await;
        let view = engine.current().ok_or(UsagePromptError::NotPrompting)?;
        let subscription_id = view.item.subscription_id;

        match self.subscriptions.log_signal(&subscription_id, signal).await {
            Ok(_) => {}
            Err(SubscriptionError::NotFound(_)) => {
                warn!(
                    %subscription_id,
                    "usage_prompt: subscription removed mid-cycle, answer dropped"
                );
            }
            Err(err) => {
                error!(%subscription_id, error = %err, "usage_prompt: failed to log answer");
                return Err(err.into());
            }
        }

        engine.answer(signal);
        Ok(progress(&engine))
    }

    pub async fn skip(&self) -> Result<PromptProgress, UsagePromptError> {
        let mut engine = self.engine.lock().await;
        if !engine.skip() {
            return Err(UsagePromptError::NotPrompting);
        }
        debug!("usage_prompt: question skipped");
        Ok(progress(&engine))
    }

    /// Closes a finished cycle and marks today as done. Returns false when nothing was finished.
    pub async fn acknowledge(&self) -> Result<bool, UsagePromptError> {
        let mut engine = self.engine.lock().await;
        if !engine.is_finished() {
            return Ok(false);
        }
        self.mark_done().await?;
        engine.acknowledge();
        info!("usage_prompt: cycle completed");
        Ok(true)
    }

    /// Abandons whatever is in progress. Today still counts as done.
    pub async fn dismiss(&self) -> Result<(), UsagePromptError> {
        let mut engine = self.engine.lock().await;
        self.mark_done().await?;
        engine.dismiss();
        info!("usage_prompt: dismissed");
        Ok(())
    }

    /// Waits out the confirmation delay, then acknowledges. A dismissal in the
    /// meantime wins and this returns false.
    pub async fn acknowledge_after_delay(&self) -> Result<bool, UsagePromptError> {
        if !self.is_finished().await {
            return Ok(false);
        }
        tokio::time::sleep(self.finish_delay).await;
        self.acknowledge().await
    }

    pub fn spawn_auto_acknowledge(self: &Arc<Self>) -> JoinHandle<()> {
        let use_case = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = use_case.acknowledge_after_delay().await {
                error!(error = %err, "usage_prompt: auto acknowledge failed");
            }
        })
    }

    async fn mark_done(&self) -> Result<(), UsagePromptError> {
        let today = self.clock.today();
        self.usage_prompt_repository
            .save_done_date(today)
            .await
            .map_err(|err| {
                error!(%today, db_error = ?err, "usage_prompt: failed to persist done marker");
                err
            })?;
        Ok(())
    }
}

fn progress(engine: &UsagePromptEngine) -> PromptProgress {
    match engine.current() {
        Some(view) => PromptProgress::Next(view),
        None => PromptProgress::Finished,
    }
}
