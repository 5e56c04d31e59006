pub mod json_file;
pub mod keys;
pub mod memory;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::domain::repositories::key_value::KeyValueStore;

pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Reads and decodes a JSON slot. Malformed content is logged and treated as absent.
pub async fn read_json<T: DeserializeOwned>(store: &SharedStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                key,
                parse_error = %err,
                "storage: discarding malformed slot, falling back to default"
            );
            Ok(None)
        }
    }
}

pub async fn write_json<T: Serialize + ?Sized>(store: &SharedStore, key: &str, value: &T) -> Result<()> {
    let encoded =
        serde_json::to_string(value).with_context(|| format!("failed to encode slot {key}"))?;
    store.set(key, &encoded).await
}
