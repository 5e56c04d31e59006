use anyhow::Result;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    domain::{
        entities::events::{FeedbackEventEntity, ShareEventEntity},
        repositories::events::EventLogRepository,
    },
    infra::storage::{self, SharedStore, keys},
};

pub struct EventLogLocalStorage {
    store: SharedStore,
    append_lock: Mutex<()>,
}

impl EventLogLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    /// Appends to the JSON array in `key`. A malformed array is replaced by a fresh one.
    /// The read and write happen under one lock so overlapping appends are not lost.
    async fn append<T>(&self, key: &str, event: T) -> Result<usize>
    where
        T: Serialize + DeserializeOwned + Send,
    {
        let _guard = self.append_lock.lock().await;
        let mut events: Vec<T> = storage::read_json(&self.store, key)
            .await?
            .unwrap_or_default();
        events.push(event);
        storage::write_json(&self.store, key, &events).await?;
        Ok(events.len())
    }
}

#[async_trait]
impl EventLogRepository for EventLogLocalStorage {
    async fn append_feedback(&self, event: FeedbackEventEntity) -> Result<usize> {
        self.append(keys::FEEDBACK, event).await
    }

    async fn append_share(&self, event: ShareEventEntity) -> Result<usize> {
        self.append(keys::SHARE_LOGS, event).await
    }
}
