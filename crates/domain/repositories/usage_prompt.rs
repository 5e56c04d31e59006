use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

#[async_trait]
#[automock]
pub trait UsagePromptRepository {
    /// The last day the prompt cycle was completed or dismissed.
    async fn load_done_date(&self) -> Result<Option<NaiveDate>>;
    async fn save_done_date(&self, date: NaiveDate) -> Result<()>;
}
