use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Durable string slots keyed by name, the way browser local storage behaves.
#[async_trait]
#[automock]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
