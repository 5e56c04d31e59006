use std::sync::Arc;

use chrono::NaiveDate;
use subcentral::domain::{
    clock::Clock,
    entities::subscriptions::{SubscriptionEntity, UpdateSubscriptionEntity},
    ledger::{self, SubscriptionLedger},
    repositories::{subscriptions::SubscriptionRepository, tiers::TierRepository},
    value_objects::{
        enums::{plans::Plan, subscription_statuses::SubscriptionStatus},
        subscriptions::{self as forms, FormValidationError, SubscriptionForm},
        usage::UsageSignal,
    },
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::usecases::tiers::TierUseCase;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Validation(#[from] FormValidationError),
    #[error("usage must be between 0 and 24 hours, got {0}")]
    InvalidUsage(f64),
    #[error("the {plan} plan allows at most {limit} subscriptions")]
    EntitlementDenied { plan: Plan, limit: usize },
    #[error("subscription not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Owns the ledger for the session. Every mutation is serialized and written through.
pub struct SubscriptionUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    subscription_repository: Arc<S>,
    tiers: Arc<TierUseCase<T>>,
    clock: Arc<dyn Clock>,
    ledger: Mutex<SubscriptionLedger>,
}

impl<S, T> SubscriptionUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    pub async fn load(
        subscription_repository: Arc<S>,
        tiers: Arc<TierUseCase<T>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SubscriptionError> {
        let subscriptions = subscription_repository.load_all().await?;
        info!(count = subscriptions.len(), "subscriptions: ledger loaded");

        Ok(Self {
            subscription_repository,
            tiers,
            clock,
            ledger: Mutex::new(SubscriptionLedger::new(subscriptions)),
        })
    }

    /// Applies `change` to a copy of the ledger, persists the copy, then commits it.
    /// A failed write leaves the in-memory ledger untouched.
    async fn mutate<F, R>(&self, change: F) -> Result<R, SubscriptionError>
    where
        F: FnOnce(&mut SubscriptionLedger) -> Result<R, SubscriptionError> + Send,
        R: Send,
    {
        let mut ledger = self.ledger.lock().await;
        let mut next = ledger.clone();
        let outcome = change(&mut next)?;

        self.subscription_repository
            .save_all(next.as_slice())
            .await
            .map_err(|err| {
                error!(
                    count = next.len(),
                    db_error = ?err,
                    "subscriptions: failed to persist ledger"
                );
                err
            })?;

        *ledger = next;
        Ok(outcome)
    }

    pub async fn add(&self, form: SubscriptionForm) -> Result<SubscriptionEntity, SubscriptionError> {
        let validated = form.validate(self.clock.today()).map_err(|err| {
            debug!(error = %err, "subscriptions: add rejected by validation");
            err
        })?;

        let limits = self.tiers.limits().await;
        let plan = self.tiers.current_plan().await;

        let entity = self
            .mutate(|ledger| {
                if !limits.can_add(ledger.len()) {
                    let limit = limits.max_subscriptions.unwrap_or(usize::MAX);
                    warn!(%plan, limit, count = ledger.len(), "subscriptions: tier ceiling reached");
                    return Err(SubscriptionError::EntitlementDenied { plan, limit });
                }
                Ok(ledger.add(validated.into_insert()))
            })
            .await?;

        info!(
            subscription_id = %entity.id,
            service = %entity.service,
            "subscriptions: added"
        );
        Ok(entity)
    }

    /// Full edit from the form. Usage history and last-used are preserved.
    pub async fn edit(
        &self,
        id: &str,
        form: SubscriptionForm,
    ) -> Result<SubscriptionEntity, SubscriptionError> {
        let validated = form.validate(self.clock.today())?;
        self.apply(id, validated.into_update()).await
    }

    /// Partial update with the same value rules as the form.
    pub async fn update(
        &self,
        id: &str,
        update: UpdateSubscriptionEntity,
    ) -> Result<SubscriptionEntity, SubscriptionError> {
        if let Some(cost) = update.monthly_cost {
            forms::validate_cost(cost)?;
        }
        if let Some(service) = &update.service {
            if service.trim().is_empty() {
                return Err(FormValidationError::MissingName.into());
            }
        }
        self.apply(id, update).await
    }

    pub async fn pause(&self, id: &str) -> Result<SubscriptionEntity, SubscriptionError> {
        self.apply(id, UpdateSubscriptionEntity::pause()).await
    }

    pub async fn resume(
        &self,
        id: &str,
        next_billing: Option<NaiveDate>,
    ) -> Result<SubscriptionEntity, SubscriptionError> {
        let next_billing = forms::validate_renewal(next_billing, self.clock.today())?;
        self.apply(id, UpdateSubscriptionEntity::resume(next_billing))
            .await
    }

    async fn apply(
        &self,
        id: &str,
        update: UpdateSubscriptionEntity,
    ) -> Result<SubscriptionEntity, SubscriptionError> {
        let today = self.clock.today();
        let entity = self
            .mutate(|ledger| {
                let current = ledger
                    .get(id)
                    .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))?;
                // A paused record drops its renewal date, so only active ones are checked.
                if update.status.unwrap_or(current.status) == SubscriptionStatus::Active {
                    if let Some(next_billing) = update.next_billing {
                        forms::validate_renewal(next_billing, today)?;
                    }
                }
                ledger
                    .update(id, update)
                    .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
            })
            .await?;

        info!(
            subscription_id = %entity.id,
            status = %entity.status,
            "subscriptions: updated"
        );
        Ok(entity)
    }

    pub async fn delete(&self, id: &str) -> Result<SubscriptionEntity, SubscriptionError> {
        let removed = self
            .mutate(|ledger| {
                ledger
                    .delete(id)
                    .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
            })
            .await?;

        info!(
            subscription_id = %removed.id,
            service = %removed.service,
            "subscriptions: deleted"
        );
        Ok(removed)
    }

    pub async fn log_usage(&self, id: &str, hours: f64) -> Result<SubscriptionEntity, SubscriptionError> {
        let signal = UsageSignal::hours(hours).map_err(|_| SubscriptionError::InvalidUsage(hours))?;
        self.log_signal(id, signal).await
    }

    pub async fn log_signal(
        &self,
        id: &str,
        signal: UsageSignal,
    ) -> Result<SubscriptionEntity, SubscriptionError> {
        let entity = self
            .mutate(|ledger| {
                ledger
                    .log_usage(id, signal)
                    .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
            })
            .await?;

        debug!(
            subscription_id = %entity.id,
            hours = signal.value(),
            usage = %entity.current_month_usage,
            "subscriptions: usage logged"
        );
        Ok(entity)
    }

    pub async fn select(&self, id: &str) -> Result<SubscriptionEntity, SubscriptionError> {
        let mut ledger = self.ledger.lock().await;
        if !ledger.select(id) {
            return Err(SubscriptionError::NotFound(id.to_string()));
        }
        ledger
            .selected()
            .cloned()
            .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
    }

    pub async fn clear_selection(&self) {
        self.ledger.lock().await.clear_selection();
    }

    pub async fn selected(&self) -> Option<SubscriptionEntity> {
        self.ledger.lock().await.selected().cloned()
    }

    pub async fn get(&self, id: &str) -> Result<SubscriptionEntity, SubscriptionError> {
        self.ledger
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
    }

    pub async fn list_all(&self) -> Vec<SubscriptionEntity> {
        self.ledger.lock().await.list_all()
    }

    pub async fn count(&self) -> usize {
        self.ledger.lock().await.len()
    }

    pub async fn active(&self) -> Vec<SubscriptionEntity> {
        let ledger = self.ledger.lock().await;
        ledger::active(ledger.as_slice()).into_iter().cloned().collect()
    }

    pub async fn paused(&self) -> Vec<SubscriptionEntity> {
        let ledger = self.ledger.lock().await;
        ledger::paused(ledger.as_slice()).into_iter().cloned().collect()
    }

    pub async fn shared(&self) -> Vec<SubscriptionEntity> {
        let ledger = self.ledger.lock().await;
        ledger::shared(ledger.as_slice()).into_iter().cloned().collect()
    }

    pub async fn inactive_for(&self, threshold_days: u32) -> Vec<SubscriptionEntity> {
        let ledger = self.ledger.lock().await;
        ledger::inactive_for(ledger.as_slice(), threshold_days)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subcentral::domain::{
        clock::FixedClock,
        repositories::{
            subscriptions::MockSubscriptionRepository, tiers::MockTierRepository,
        },
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus, last_used::LastUsed,
        },
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn form(name: &str, cost: &str) -> SubscriptionForm {
        SubscriptionForm {
            name: name.to_string(),
            category: "Entertainment".to_string(),
            cost: cost.to_string(),
            renewal: "2026-02-15".to_string(),
            shared: String::new(),
            status: SubscriptionStatus::Active,
        }
    }

    fn stored(id: &str, service: &str, status: SubscriptionStatus, cost: f64) -> SubscriptionEntity {
        SubscriptionEntity {
            id: id.to_string(),
            service: service.to_string(),
            icon: String::new(),
            status,
            next_billing: match status {
                SubscriptionStatus::Active => NaiveDate::from_ymd_opt(2026, 2, 20),
                SubscriptionStatus::Paused => None,
            },
            monthly_cost: cost,
            last_used: LastUsed::Today,
            current_month_usage: "0 hrs".to_string(),
            shared: false,
            shared_with: vec![],
            category: "Other".to_string(),
            daily_hours: vec![],
        }
    }

    async fn tiers_on(plan: Plan) -> Arc<TierUseCase<MockTierRepository>> {
        let mut tier_repository = MockTierRepository::new();
        tier_repository
            .expect_load_plan()
            .returning(move || Box::pin(async move { Ok(Some(plan)) }));
        Arc::new(TierUseCase::load(Arc::new(tier_repository)).await.unwrap())
    }

    async fn use_case(
        existing: Vec<SubscriptionEntity>,
        expected_saves: usize,
        plan: Plan,
    ) -> SubscriptionUseCase<MockSubscriptionRepository, MockTierRepository> {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository.expect_load_all().returning(move || {
            let existing = existing.clone();
            Box::pin(async move { Ok(existing) })
        });
        subscription_repository
            .expect_save_all()
            .times(expected_saves)
            .returning(|_| Box::pin(async { Ok(()) }));

        SubscriptionUseCase::load(
            Arc::new(subscription_repository),
            tiers_on(plan).await,
            Arc::new(FixedClock::new(today())),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn add_appends_record_with_empty_log() {
        let subscriptions = use_case(vec![], 1, Plan::Basic).await;

        let added = subscriptions.add(form("Netflix", "15.99")).await.unwrap();

        let all = subscriptions.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], added);
        assert_eq!(added.service, "Netflix");
        assert_eq!(added.monthly_cost, 15.99);
        assert!(added.daily_hours.is_empty());
        assert_eq!(added.last_used, LastUsed::Never);
    }

    #[tokio::test]
    async fn add_is_blocked_at_tier_ceiling() {
        let existing = (1..=4)
            .map(|n| stored(&n.to_string(), "Service", SubscriptionStatus::Active, 1.0))
            .collect();
        let subscriptions = use_case(existing, 0, Plan::Basic).await;

        let result = subscriptions.add(form("Spotify", "9.99")).await;

        assert!(matches!(
            result,
            Err(SubscriptionError::EntitlementDenied {
                plan: Plan::Basic,
                limit: 4
            })
        ));
        assert_eq!(subscriptions.count().await, 4);
    }

    #[tokio::test]
    async fn add_rejects_invalid_form_without_saving() {
        let subscriptions = use_case(vec![], 0, Plan::PremiumPlus).await;

        let negative = subscriptions.add(form("Netflix", "-1")).await;
        assert!(matches!(
            negative,
            Err(SubscriptionError::Validation(FormValidationError::NegativeCost))
        ));

        let mut past = form("Netflix", "5");
        past.renewal = "2026-02-09".to_string();
        assert!(matches!(
            subscriptions.add(past).await,
            Err(SubscriptionError::Validation(FormValidationError::PastRenewal(_)))
        ));
        assert!(subscriptions.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn edit_keeps_usage_history() {
        let mut entity = stored("1", "Netflix", SubscriptionStatus::Active, 15.99);
        entity.daily_hours = vec![1.0, 2.0];
        entity.current_month_usage = "3 hrs".to_string();
        let subscriptions = use_case(vec![entity], 1, Plan::Basic).await;

        let mut changed = form("Netflix Premium", "22.99");
        changed.shared = "Alice, Bob".to_string();
        let edited = subscriptions.edit("1", changed).await.unwrap();

        assert_eq!(edited.id, "1");
        assert_eq!(edited.service, "Netflix Premium");
        assert_eq!(edited.monthly_cost, 22.99);
        assert!(edited.shared);
        assert_eq!(edited.daily_hours, vec![1.0, 2.0]);
        assert_eq!(edited.current_month_usage, "3 hrs");
        assert_eq!(edited.last_used, LastUsed::Today);
    }

    #[tokio::test]
    async fn pause_clears_next_billing() {
        let existing = vec![stored("1", "Netflix", SubscriptionStatus::Active, 15.99)];
        let subscriptions = use_case(existing, 1, Plan::Basic).await;

        let paused = subscriptions.pause("1").await.unwrap();

        assert_eq!(paused.status, SubscriptionStatus::Paused);
        assert_eq!(paused.next_billing, None);
    }

    #[tokio::test]
    async fn pausing_update_ignores_stale_renewal() {
        let existing = vec![stored("1", "Netflix", SubscriptionStatus::Active, 15.99)];
        let subscriptions = use_case(existing, 1, Plan::Basic).await;

        let stale = UpdateSubscriptionEntity {
            status: Some(SubscriptionStatus::Paused),
            next_billing: Some(NaiveDate::from_ymd_opt(2026, 1, 1)),
            ..Default::default()
        };
        let paused = subscriptions.update("1", stale).await.unwrap();

        assert_eq!(paused.status, SubscriptionStatus::Paused);
        assert_eq!(paused.next_billing, None);
    }

    #[tokio::test]
    async fn active_update_rejects_past_renewal() {
        let existing = vec![stored("1", "Netflix", SubscriptionStatus::Active, 15.99)];
        let subscriptions = use_case(existing, 0, Plan::Basic).await;

        let stale = UpdateSubscriptionEntity {
            next_billing: Some(NaiveDate::from_ymd_opt(2026, 1, 1)),
            ..Default::default()
        };
        assert!(matches!(
            subscriptions.update("1", stale).await,
            Err(SubscriptionError::Validation(FormValidationError::PastRenewal(_)))
        ));
        assert_eq!(
            subscriptions.get("1").await.unwrap().next_billing,
            NaiveDate::from_ymd_opt(2026, 2, 20)
        );
    }

    #[tokio::test]
    async fn downgrade_keeps_existing_and_blocks_new_adds() {
        let mut tier_repository = MockTierRepository::new();
        tier_repository
            .expect_load_plan()
            .returning(|| Box::pin(async { Ok(Some(Plan::Premium)) }));
        tier_repository
            .expect_save_plan()
            .with(mockall::predicate::eq(Plan::Basic))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        let tiers = Arc::new(TierUseCase::load(Arc::new(tier_repository)).await.unwrap());

        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_load_all()
            .returning(|| Box::pin(async { Ok(vec![]) }));
        subscription_repository
            .expect_save_all()
            .times(5)
            .returning(|_| Box::pin(async { Ok(()) }));
        let subscriptions = SubscriptionUseCase::load(
            Arc::new(subscription_repository),
            Arc::clone(&tiers),
            Arc::new(FixedClock::new(today())),
        )
        .await
        .unwrap();

        for n in 1..=5 {
            subscriptions
                .add(form(&format!("Service {n}"), "4.99"))
                .await
                .unwrap();
        }

        tiers.set_plan(Plan::Basic).await.unwrap();

        assert_eq!(subscriptions.list_all().await.len(), 5);
        assert!(matches!(
            subscriptions.add(form("Spotify", "9.99")).await,
            Err(SubscriptionError::EntitlementDenied {
                plan: Plan::Basic,
                limit: 4
            })
        ));
        assert_eq!(subscriptions.count().await, 5);
    }

    #[tokio::test]
    async fn resume_validates_the_new_date() {
        let existing = vec![stored("6", "Adobe CC", SubscriptionStatus::Paused, 54.99)];
        let subscriptions = use_case(existing, 1, Plan::Basic).await;

        let past = NaiveDate::from_ymd_opt(2026, 1, 1);
        assert!(matches!(
            subscriptions.resume("6", past).await,
            Err(SubscriptionError::Validation(_))
        ));

        let resumed = subscriptions
            .resume("6", NaiveDate::from_ymd_opt(2026, 3, 1))
            .await
            .unwrap();
        assert!(resumed.is_active());
        assert_eq!(resumed.next_billing, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[tokio::test]
    async fn delete_clears_selection() {
        let existing = vec![
            stored("1", "Netflix", SubscriptionStatus::Active, 15.99),
            stored("2", "Spotify", SubscriptionStatus::Active, 9.99),
        ];
        let subscriptions = use_case(existing, 1, Plan::Basic).await;

        subscriptions.select("1").await.unwrap();
        subscriptions.delete("1").await.unwrap();

        assert_eq!(subscriptions.selected().await, None);
        assert!(subscriptions.list_all().await.iter().all(|s| s.id != "1"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let subscriptions = use_case(vec![], 0, Plan::Basic).await;

        assert!(matches!(
            subscriptions.delete("missing").await,
            Err(SubscriptionError::NotFound(_))
        ));
        assert!(matches!(
            subscriptions.pause("missing").await,
            Err(SubscriptionError::NotFound(_))
        ));
        assert!(matches!(
            subscriptions.log_usage("missing", 1.0).await,
            Err(SubscriptionError::NotFound(_))
        ));
        assert!(matches!(
            subscriptions.select("missing").await,
            Err(SubscriptionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn log_usage_updates_derived_fields() {
        let mut entity = stored("1", "Netflix", SubscriptionStatus::Active, 15.99);
        entity.last_used = LastUsed::DaysAgo(5);
        let subscriptions = use_case(vec![entity], 2, Plan::Basic).await;

        let after_zero = subscriptions.log_usage("1", 0.0).await.unwrap();
        assert_eq!(after_zero.last_used, LastUsed::DaysAgo(5));

        let after_use = subscriptions.log_usage("1", 2.5).await.unwrap();
        assert_eq!(after_use.last_used, LastUsed::Today);
        assert_eq!(after_use.daily_hours, vec![0.0, 2.5]);
        assert_eq!(after_use.current_month_usage, "2.5 hrs");
    }

    #[tokio::test]
    async fn out_of_range_usage_is_rejected() {
        let existing = vec![stored("1", "Netflix", SubscriptionStatus::Active, 15.99)];
        let subscriptions = use_case(existing, 0, Plan::Basic).await;

        assert!(matches!(
            subscriptions.log_usage("1", 25.0).await,
            Err(SubscriptionError::InvalidUsage(_))
        ));
    }

    #[tokio::test]
    async fn failed_write_leaves_ledger_untouched() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_load_all()
            .returning(|| Box::pin(async { Ok(vec![]) }));
        subscription_repository
            .expect_save_all()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("quota exceeded")) }));

        let subscriptions = SubscriptionUseCase::load(
            Arc::new(subscription_repository),
            tiers_on(Plan::Basic).await,
            Arc::new(FixedClock::new(today())),
        )
        .await
        .unwrap();

        let result = subscriptions.add(form("Netflix", "15.99")).await;
        assert!(matches!(result, Err(SubscriptionError::Internal(_))));
        assert!(subscriptions.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn subsets_follow_status_and_sharing() {
        let mut shared_entity = stored("2", "Spotify", SubscriptionStatus::Active, 9.99);
        shared_entity.shared = true;
        shared_entity.shared_with = vec!["Alice".to_string()];
        let mut stale = stored("3", "Grammarly", SubscriptionStatus::Active, 12.0);
        stale.last_used = LastUsed::DaysAgo(35);
        let existing = vec![
            stored("1", "Netflix", SubscriptionStatus::Active, 15.99),
            shared_entity,
            stale,
            stored("4", "Adobe CC", SubscriptionStatus::Paused, 54.99),
        ];
        let subscriptions = use_case(existing, 0, Plan::Basic).await;

        assert_eq!(subscriptions.active().await.len(), 3);
        assert_eq!(subscriptions.paused().await.len(), 1);
        assert_eq!(subscriptions.shared().await[0].id, "2");
        assert_eq!(subscriptions.inactive_for(30).await[0].id, "3");
    }
}
