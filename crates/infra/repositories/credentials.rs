use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    domain::{
        entities::users::{CredentialEntity, UserProfileEntity},
        repositories::credentials::CredentialRepository,
    },
    infra::storage::{self, SharedStore, keys},
};

pub struct CredentialLocalStorage {
    store: SharedStore,
}

impl CredentialLocalStorage {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialRepository for CredentialLocalStorage {
    async fn load_accounts(&self) -> Result<BTreeMap<String, CredentialEntity>> {
        Ok(storage::read_json(&self.store, keys::USERS)
            .await?
            .unwrap_or_default())
    }

    async fn save_accounts(&self, accounts: &BTreeMap<String, CredentialEntity>) -> Result<()> {
        storage::write_json(&self.store, keys::USERS, accounts).await
    }

    async fn load_session(&self) -> Result<Option<UserProfileEntity>> {
        storage::read_json(&self.store, keys::SESSION).await
    }

    async fn save_session(&self, profile: &UserProfileEntity) -> Result<()> {
        storage::write_json(&self.store, keys::SESSION, profile).await
    }

    async fn clear_session(&self) -> Result<()> {
        self.store.remove(keys::SESSION).await
    }
}
