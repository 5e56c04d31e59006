use std::{sync::Arc, time::Duration};

use anyhow::Result;
use subcentral::{
    domain::{clock::Clock, value_objects::usage_prompt::PromptView},
    infra::{
        repositories::{
            credentials::CredentialLocalStorage, events::EventLogLocalStorage,
            locales::LocaleLocalStorage, subscriptions::SubscriptionLocalStorage,
            tiers::TierLocalStorage, usage_prompt::UsagePromptLocalStorage,
        },
        storage::{SharedStore, json_file::JsonFileStore, memory::InMemoryStore},
    },
};
use tracing::info;

use crate::{
    config::config_model::{DotEnvyConfig, Storage},
    usecases::{
        analytics::AnalyticsUseCase, auth::AuthUseCase, export::ExportUseCase,
        feedback::FeedbackUseCase, locales::LocaleUseCase, subscriptions::SubscriptionUseCase,
        tiers::TierUseCase, usage_prompt::UsagePromptUseCase,
    },
};

pub type Tiers = TierUseCase<TierLocalStorage>;
pub type Subscriptions = SubscriptionUseCase<SubscriptionLocalStorage, TierLocalStorage>;
pub type UsagePrompt =
    UsagePromptUseCase<SubscriptionLocalStorage, TierLocalStorage, UsagePromptLocalStorage>;
pub type Analytics = AnalyticsUseCase<SubscriptionLocalStorage, TierLocalStorage>;
pub type Export = ExportUseCase<SubscriptionLocalStorage, TierLocalStorage>;
pub type Locale = LocaleUseCase<LocaleLocalStorage>;
pub type Auth = AuthUseCase<CredentialLocalStorage>;
pub type Feedback = FeedbackUseCase<EventLogLocalStorage>;

/// Everything the dashboard needs, built once at startup and passed around explicitly.
pub struct AppContext {
    pub clock: Arc<dyn Clock>,
    pub tiers: Arc<Tiers>,
    pub subscriptions: Arc<Subscriptions>,
    pub usage_prompt: Arc<UsagePrompt>,
    pub analytics: Arc<Analytics>,
    pub export: Arc<Export>,
    pub locale: Arc<Locale>,
    pub auth: Arc<Auth>,
    pub feedback: Arc<Feedback>,
}

pub async fn open_store(storage: &Storage) -> Result<SharedStore> {
    match &storage.data_dir {
        Some(dir) => {
            let store = JsonFileStore::open(dir.clone()).await?;
            info!(data_dir = %dir.display(), "context: using json file storage");
            Ok(Arc::new(store))
        }
        None => {
            info!("context: no data directory configured, state lives in memory");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

impl AppContext {
    pub async fn build(config: &DotEnvyConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = open_store(&config.storage).await?;
        Self::with_store(store, config, clock).await
    }

    /// Reads every persisted slot once and wires the use cases over `store`.
    pub async fn with_store(
        store: SharedStore,
        config: &DotEnvyConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let tiers = Arc::new(
            TierUseCase::load(Arc::new(TierLocalStorage::new(Arc::clone(&store)))).await?,
        );

        let subscriptions = Arc::new(
            SubscriptionUseCase::load(
                Arc::new(SubscriptionLocalStorage::new(Arc::clone(&store))),
                Arc::clone(&tiers),
                Arc::clone(&clock),
            )
            .await?,
        );

        let usage_prompt = Arc::new(UsagePromptUseCase::new(
            Arc::new(UsagePromptLocalStorage::new(Arc::clone(&store))),
            Arc::clone(&subscriptions),
            Arc::clone(&clock),
            Duration::from_millis(config.usage_prompt.finish_delay_ms),
        ));

        let analytics = Arc::new(AnalyticsUseCase::new(
            Arc::clone(&subscriptions),
            Arc::clone(&tiers),
            Arc::clone(&clock),
        ));

        let export = Arc::new(ExportUseCase::new(
            Arc::clone(&subscriptions),
            Arc::clone(&tiers),
        ));

        let locale = Arc::new(
            LocaleUseCase::load(
                Arc::new(LocaleLocalStorage::new(Arc::clone(&store))),
                &config.locale.default_country,
            )
            .await?,
        );

        let auth = Arc::new(
            AuthUseCase::load(Arc::new(CredentialLocalStorage::new(Arc::clone(&store)))).await?,
        );

        let feedback = Arc::new(FeedbackUseCase::new(
            Arc::new(EventLogLocalStorage::new(store)),
            Arc::clone(&clock),
        ));

        let plan = tiers.current_plan().await;
        let count = subscriptions.count().await;
        let country = locale.current().await;
        let signed_in = auth.is_authenticated().await;
        info!(
            %plan,
            subscriptions = count,
            country = country.code,
            signed_in,
            "context: application state loaded"
        );

        Ok(Self {
            clock,
            tiers,
            subscriptions,
            usage_prompt,
            analytics,
            export,
            locale,
            auth,
            feedback,
        })
    }

    /// Opens today's usage check in the selected country's language.
    pub async fn start_usage_prompt(&self) -> Result<Option<PromptView>> {
        let language = self.locale.language().await;
        Ok(self.usage_prompt.start(language).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        config_model::{Export as ExportConfig, Locale as LocaleConfig, UsagePrompt as PromptConfig},
        stage::Stage,
    };
    use chrono::NaiveDate;
    use subcentral::domain::{
        clock::FixedClock,
        value_objects::{enums::plans::Plan, subscriptions::SubscriptionForm},
    };

    fn config(data_dir: Option<std::path::PathBuf>) -> DotEnvyConfig {
        DotEnvyConfig {
            stage: Stage::Local,
            storage: Storage { data_dir },
            usage_prompt: PromptConfig { finish_delay_ms: 0 },
            locale: LocaleConfig {
                default_country: "us".to_string(),
            },
            export: ExportConfig { csv_path: None },
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()))
    }

    fn netflix() -> SubscriptionForm {
        SubscriptionForm {
            name: "Netflix".to_string(),
            category: "Entertainment".to_string(),
            cost: "15.99".to_string(),
            renewal: "2026-02-15".to_string(),
            shared: "Alice, Bob".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn state_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(Some(dir.path().to_path_buf()));

        let first = AppContext::build(&config, clock()).await.unwrap();
        first.tiers.set_plan(Plan::Premium).await.unwrap();
        first.locale.set_country("in").await.unwrap();
        let added = first.subscriptions.add(netflix()).await.unwrap();
        first.subscriptions.log_usage(&added.id, 3.0).await.unwrap();
        let before = first.subscriptions.list_all().await;
        drop(first);

        let second = AppContext::build(&config, clock()).await.unwrap();
        assert_eq!(second.tiers.current_plan().await, Plan::Premium);
        assert_eq!(second.locale.current().await.code, "in");
        assert_eq!(second.subscriptions.list_all().await, before);
    }

    #[tokio::test]
    async fn usage_prompt_does_not_repeat_same_day() {
        let store: SharedStore = Arc::new(InMemoryStore::new());
        let config = config(None);

        let first = AppContext::with_store(Arc::clone(&store), &config, clock())
            .await
            .unwrap();
        first.subscriptions.add(netflix()).await.unwrap();
        assert!(first.start_usage_prompt().await.unwrap().is_some());
        first.usage_prompt.dismiss().await.unwrap();

        first
            .subscriptions
            .add(SubscriptionForm {
                name: "Spotify".to_string(),
                cost: "9.99".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(first.start_usage_prompt().await.unwrap().is_none());

        let second = AppContext::with_store(store, &config, clock()).await.unwrap();
        assert!(second.start_usage_prompt().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hindi_locale_asks_in_hindi() {
        let config = config(None);
        let context = AppContext::build(&config, clock()).await.unwrap();
        context.locale.set_country("in").await.unwrap();
        context.subscriptions.add(netflix()).await.unwrap();

        let view = context.start_usage_prompt().await.unwrap().unwrap();
        assert!(view.item.question.contains("Netflix"));
        assert!(view
            .item
            .question
            .chars()
            .any(|ch| ('\u{0900}'..='\u{097F}').contains(&ch)));
    }
}
