use std::{path::Path, sync::Arc};

use anyhow::Context;
use subcentral::domain::{
    repositories::{subscriptions::SubscriptionRepository, tiers::TierRepository},
    value_objects::{
        export::{self, EXPORT_FILE_NAME},
        plans::Feature,
    },
};
use thiserror::Error;
use tracing::info;

use crate::usecases::{
    subscriptions::SubscriptionUseCase,
    tiers::{TierError, TierUseCase},
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    EntitlementDenied(#[from] TierError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content: String,
    pub rows: usize,
}

pub struct ExportUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    subscriptions: Arc<SubscriptionUseCase<S, T>>,
    tiers: Arc<TierUseCase<T>>,
}

impl<S, T> ExportUseCase<S, T>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TierRepository + Send + Sync + 'static,
{
    pub fn new(subscriptions: Arc<SubscriptionUseCase<S, T>>, tiers: Arc<TierUseCase<T>>) -> Self {
        Self {
            subscriptions,
            tiers,
        }
    }

    pub async fn export_csv(&self) -> Result<CsvExport, ExportError> {
        self.tiers.ensure_feature(Feature::DataExport).await?;

        let snapshot = self.subscriptions.list_all().await;
        let content = export::render_csv(&snapshot);
        let rows = content.lines().count();

        info!(subscriptions = snapshot.len(), rows, "export: csv rendered");
        Ok(CsvExport {
            file_name: EXPORT_FILE_NAME,
            content,
            rows,
        })
    }

    pub async fn write_csv(&self, path: &Path) -> Result<CsvExport, ExportError> {
        let csv = self.export_csv().await?;
        tokio::fs::write(path, &csv.content)
            .await
            .with_context(|| format!("failed to write export to {}", path.display()))?;

        info!(path = %path.display(), "export: csv written");
        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use subcentral::{
        domain::{
            clock::{Clock, FixedClock},
            value_objects::{enums::plans::Plan, subscriptions::SubscriptionForm},
        },
        infra::{
            repositories::{subscriptions::SubscriptionLocalStorage, tiers::TierLocalStorage},
            storage::{SharedStore, memory::InMemoryStore},
        },
    };

    async fn export_on(
        plan: Plan,
    ) -> ExportUseCase<SubscriptionLocalStorage, TierLocalStorage> {
        let store: SharedStore = Arc::new(InMemoryStore::new());
        let tier_repository = TierLocalStorage::new(Arc::clone(&store));
        tier_repository.save_plan(plan).await.unwrap();

        let tiers = Arc::new(TierUseCase::load(Arc::new(tier_repository)).await.unwrap());
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()));
        let subscriptions = Arc::new(
            SubscriptionUseCase::load(
                Arc::new(SubscriptionLocalStorage::new(store)),
                Arc::clone(&tiers),
                clock,
            )
            .await
            .unwrap(),
        );

        for (name, cost) in [("Netflix", "15.99"), ("Spotify", "9.99")] {
            subscriptions
                .add(SubscriptionForm {
                    name: name.to_string(),
                    cost: cost.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        ExportUseCase::new(subscriptions, tiers)
    }

    #[tokio::test]
    async fn export_requires_premium_plus() {
        let export = export_on(Plan::Premium).await;

        assert!(matches!(
            export.export_csv().await,
            Err(ExportError::EntitlementDenied(TierError::EntitlementDenied {
                feature: Feature::DataExport,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn export_has_header_rows_and_trailer() {
        let export = export_on(Plan::PremiumPlus).await;

        let csv = export.export_csv().await.unwrap();
        assert_eq!(csv.file_name, "subcentral-export.csv");
        assert_eq!(csv.rows, 2 + 1 + 3);
        assert!(csv.content.ends_with("Monthly Waste,0.00"));
    }

    #[tokio::test]
    async fn write_csv_lands_on_disk() {
        let export = export_on(Plan::PremiumPlus).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        let csv = export.write_csv(&path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, csv.content);
    }
}
