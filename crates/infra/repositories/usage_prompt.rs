use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

use crate::{
    domain::repositories::usage_prompt::UsagePromptRepository,
    infra::storage::{SharedStore, keys},
};

/// Same shape as a browser's `Date.toDateString()`, e.g. `Sun Oct 18 2026`.
pub const DONE_DATE_FORMAT: &str = "%a %b %d %Y";

pub struct UsagePromptLocalStorage {
    store: SharedStore,
}

impl UsagePromptLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UsagePromptRepository for UsagePromptLocalStorage {
    async fn load_done_date(&self) -> Result<Option<NaiveDate>> {
        let Some(raw) = self.store.get(keys::USAGE_PROMPT_DONE).await? else {
            return Ok(None);
        };

        match NaiveDate::parse_from_str(raw.trim(), DONE_DATE_FORMAT) {
            Ok(date) => Ok(Some(date)),
            Err(err) => {
                warn!(stored = %raw, parse_error = %err, "usage_prompt: ignoring unreadable done marker");
                Ok(None)
            }
        }
    }

    async fn save_done_date(&self, date: NaiveDate) -> Result<()> {
        let encoded = date.format(DONE_DATE_FORMAT).to_string();
        self.store.set(keys::USAGE_PROMPT_DONE, &encoded).await
    }
}
