use std::sync::Arc;

use subcentral::domain::{
    repositories::locales::LocaleRepository,
    value_objects::{
        enums::languages::Language,
        locales::{self, COUNTRIES, CountryConfig},
    },
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("unknown country code: {0}")]
    UnknownCountry(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct LocaleUseCase<L>
where
    L: LocaleRepository + Send + Sync + 'static,
{
    locale_repository: Arc<L>,
    country: RwLock<&'static CountryConfig>,
}

impl<L> LocaleUseCase<L>
where
    L: LocaleRepository + Send + Sync + 'static,
{
    /// Uses the stored selection, else `fallback_code`, else the table default.
    pub async fn load(locale_repository: Arc<L>, fallback_code: &str) -> Result<Self, LocaleError> {
        let stored = locale_repository.load_country_code().await?;
        let country = match stored.as_deref().map(|code| (code, locales::find_country(code))) {
            Some((_, Some(country))) => country,
            Some((code, None)) => {
                warn!(country = code, "locales: stored country unknown, using fallback");
                locales::country_or_default(fallback_code)
            }
            None => locales::country_or_default(fallback_code),
        };

        Ok(Self {
            locale_repository,
            country: RwLock::new(country),
        })
    }

    pub async fn current(&self) -> CountryConfig {
        **self.country.read().await
    }

    pub async fn language(&self) -> Language {
        self.country.read().await.lang
    }

    pub async fn set_country(&self, code: &str) -> Result<CountryConfig, LocaleError> {
        let country =
            locales::find_country(code).ok_or_else(|| LocaleError::UnknownCountry(code.to_string()))?;

        let mut current = self.country.write().await;
        self.locale_repository.save_country_code(country.code).await?;
        *current = country;

        info!(country = country.code, currency = country.currency, "locales: country changed");
        Ok(*country)
    }

    /// Converts a USD amount into the selected currency.
    pub async fn format_currency(&self, amount_usd: f64) -> String {
        self.country.read().await.format_currency(amount_usd)
    }

    pub fn countries(&self) -> &'static [CountryConfig] {
        &COUNTRIES
    }
}
