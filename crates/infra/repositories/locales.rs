use anyhow::Result;
use async_trait::async_trait;

use crate::{
    domain::repositories::locales::LocaleRepository,
    infra::storage::{SharedStore, keys},
};

pub struct LocaleLocalStorage {
    store: SharedStore,
}

impl LocaleLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LocaleRepository for LocaleLocalStorage {
    async fn load_country_code(&self) -> Result<Option<String>> {
        let code = self.store.get(keys::LOCALE).await?;
        Ok(code
            .map(|raw| raw.trim().trim_matches('"').to_string())
            .filter(|code| !code.is_empty()))
    }

    async fn save_country_code(&self, code: &str) -> Result<()> {
        self.store.set(keys::LOCALE, code).await
    }
}
