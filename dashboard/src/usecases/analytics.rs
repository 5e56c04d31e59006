use std::sync::Arc;

use serde::Serialize;
use subcentral::domain::{
    clock::Clock,
    repositories::{subscriptions::SubscriptionRepository, tiers::TierRepository},
    value_objects::{
        metrics::{
            self, LowUsageReport, SpendSummary, SubscriptionInsight, UpcomingRenewal,
        },
        plans::Feature,
    },
};
use thiserror::Error;
use tracing::debug;

use crate::usecases::{
    subscriptions::{SubscriptionError, SubscriptionUseCase},
    tiers::{TierError, TierUseCase},
};

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    EntitlementDenied(#[from] TierError),
    #[error("subscription not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<SubscriptionError> for AnalyticsError {
    fn from(value: SubscriptionError) -> Self {
        match value {
            SubscriptionError::NotFound(id) => AnalyticsError::NotFound(id),
            SubscriptionError::Internal(err) => AnalyticsError::Internal(err),
            other => AnalyticsError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

/// Analytics page: summary plus a deep dive for every subscription.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: SpendSummary,
    pub insights: Vec<SubscriptionInsight>,
    pub upcoming_renewals: Vec<UpcomingRenewal>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// e.g. `October 2026`
    pub month: String,
    pub summary: SpendSummary,
    pub upcoming_renewals: Vec<UpcomingRenewal>,
    pub low_usage: LowUsageReport,
}

/// Read-only views over the current ledger snapshot. Nothing here is cached.
pub struct AnalyticsUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    subscriptions: Arc<SubscriptionUseCase<S, T>>,
    tiers: Arc<TierUseCase<T>>,
    clock: Arc<dyn Clock>,
}

impl<S, T> AnalyticsUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    pub fn new(
        subscriptions: Arc<SubscriptionUseCase<S, T>>,
        tiers: Arc<TierUseCase<T>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscriptions,
            tiers,
            clock,
        }
    }

    /// Dashboard stat cards. Available on every plan.
    pub async fn dashboard_summary(&self) -> SpendSummary {
        metrics::spend_summary(&self.subscriptions.list_all().await)
    }

    pub async fn upcoming_renewals(&self) -> Vec<UpcomingRenewal> {
        metrics::upcoming_renewals(&self.subscriptions.list_all().await, self.clock.today())
    }

    pub async fn subscription_insight(&self, id: &str) -> Result<SubscriptionInsight, AnalyticsError> {
        let entity = self.subscriptions.get(id).await?;
        Ok(metrics::subscription_insight(&entity, self.clock.today()))
    }

    pub async fn analytics_report(&self) -> Result<AnalyticsReport, AnalyticsError> {
        self.tiers.ensure_feature(Feature::Analytics).await?;

        let snapshot = self.subscriptions.list_all().await;
        let today = self.clock.today();
        let report = AnalyticsReport {
            summary: metrics::spend_summary(&snapshot),
            insights: snapshot
                .iter()
                .map(|entity| metrics::subscription_insight(entity, today))
                .collect(),
            upcoming_renewals: metrics::upcoming_renewals(&snapshot, today),
        };

        debug!(
            subscriptions = snapshot.len(),
            monthly_spend = report.summary.monthly_spend,
            "analytics: report built"
        );
        Ok(report)
    }

    pub async fn low_usage_alerts(&self) -> Result<LowUsageReport, AnalyticsError> {
        self.tiers.ensure_feature(Feature::LowUsageAlerts).await?;
        Ok(metrics::low_usage_report(&self.subscriptions.list_all().await))
    }

    pub async fn monthly_summary(&self) -> Result<MonthlySummary, AnalyticsError> {
        self.tiers.ensure_feature(Feature::MonthlySummary).await?;

        let snapshot = self.subscriptions.list_all().await;
        let today = self.clock.today();
        Ok(MonthlySummary {
            month: today.format("%B %Y").to_string(),
            summary: metrics::spend_summary(&snapshot),
            upcoming_renewals: metrics::upcoming_renewals(&snapshot, today),
            low_usage: metrics::low_usage_report(&snapshot),
        })
    }
}
