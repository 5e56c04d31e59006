use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

#[async_trait]
#[automock]
pub trait LocaleRepository {
    async fn load_country_code(&self) -> Result<Option<String>>;
    async fn save_country_code(&self, code: &str) -> Result<()>;
}
