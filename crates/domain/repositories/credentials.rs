use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::users::{CredentialEntity, UserProfileEntity};

#[async_trait]
#[automock]
pub trait CredentialRepository {
    /// Every stored account keyed by normalized email.
    async fn load_accounts(&self) -> Result<BTreeMap<String, CredentialEntity>>;
    async fn save_accounts(&self, accounts: &BTreeMap<String, CredentialEntity>) -> Result<()>;

    async fn load_session(&self) -> Result<Option<UserProfileEntity>>;
    async fn save_session(&self, profile: &UserProfileEntity) -> Result<()>;
    async fn clear_session(&self) -> Result<()>;
}
