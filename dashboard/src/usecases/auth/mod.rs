use std::sync::Arc;

use anyhow::Context;
use subcentral::{
    domain::{
        entities::users::{CredentialEntity, UpdateProfileEntity, UserProfileEntity},
        repositories::credentials::CredentialRepository,
    },
    infra::crypto::password,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("passwords don't match")]
    PasswordMismatch,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub country: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

fn check_new_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

async fn hash(password: String) -> Result<String, AuthError> {
    let hashed = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .context("password hashing task failed")??;
    Ok(hashed)
}

async fn verify(password: String, stored_hash: String) -> Result<bool, AuthError> {
    let valid = tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
        .await
        .context("password verification task failed")?;
    Ok(valid)
}

/// Local account store and the signed-in session.
pub struct AuthUseCase<C>
where
    C: CredentialRepository + Send + Sync + 'static,
{
    credential_repository: Arc<C>,
    session: Mutex<Option<UserProfileEntity>>,
}

impl<C> AuthUseCase<C>
where
    C: CredentialRepository + Send + Sync + 'static,
{
    pub async fn load(credential_repository: Arc<C>) -> Result<Self, AuthError> {
        let session = credential_repository.load_session().await?;
        debug!(signed_in = session.is_some(), "auth: session restored");

        Ok(Self {
            credential_repository,
            session: Mutex::new(session),
        })
    }

    pub async fn current_user(&self) -> Option<UserProfileEntity> {
        self.session.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_some()
    }

    pub async fn sign_up(&self, form: SignUpForm) -> Result<UserProfileEntity, AuthError> {
        required(&form.name, "name")?;
        required(&form.email, "email")?;
        required(&form.password, "password")?;
        required(&form.confirm_password, "password confirmation")?;
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        check_new_password(&form.password)?;

        let email = normalize_email(&form.email);
        let mut session = self.session.lock().await;
        let mut accounts = self.credential_repository.load_accounts().await?;
        if accounts.contains_key(&email) {
            warn!(%email, "auth: sign up with existing email");
            return Err(AuthError::DuplicateEmail);
        }

        let account = CredentialEntity {
            name: form.name.trim().to_string(),
            email: email.clone(),
            password_hash: hash(form.password).await?,
            country: form.country,
            photo_base64: None,
        };
        let profile = UserProfileEntity::from(&account);

        accounts.insert(email.clone(), account);
        self.credential_repository.save_accounts(&accounts).await?;
        if let Err(err) = self.credential_repository.save_session(&profile).await {
            // Undo the account so a retry is not rejected as a duplicate.
            accounts.remove(&email);
            if let Err(rollback_err) = self.credential_repository.save_accounts(&accounts).await {
                warn!(%email, db_error = ?rollback_err, "auth: failed to roll back account");
            }
            return Err(err.into());
        }
        *session = Some(profile.clone());

        info!(%email, "auth: account created");
        Ok(profile)
    }

    /// Unknown email and wrong password are reported the same way.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfileEntity, AuthError> {
        required(email, "email")?;
        required(password, "password")?;

        let email = normalize_email(email);
        let mut session = self.session.lock().await;
        let accounts = self.credential_repository.load_accounts().await?;
        let Some(account) = accounts.get(&email) else {
            debug!(%email, "auth: sign in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify(password.to_string(), account.password_hash.clone()).await? {
            warn!(%email, "auth: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let profile = UserProfileEntity::from(account);
        self.credential_repository.save_session(&profile).await?;
        *session = Some(profile.clone());

        info!(%email, "auth: signed in");
        Ok(profile)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let mut session = self.session.lock().await;
        self.credential_repository.clear_session().await?;
        if let Some(profile) = session.take() {
            info!(email = %profile.email, "auth: signed out");
        }
        Ok(())
    }

    /// Applies profile edits to the session and the stored account.
    pub async fn update_profile(
        &self,
        update: UpdateProfileEntity,
    ) -> Result<UserProfileEntity, AuthError> {
        let mut session = self.session.lock().await;
        let mut profile = session.clone().ok_or(AuthError::NotSignedIn)?;

        if let Some(name) = update.name {
            required(&name, "name")?;
            profile.name = name.trim().to_string();
        }
        if let Some(country) = update.country {
            profile.country = country;
        }
        if let Some(photo_base64) = update.photo_base64 {
            profile.photo_base64 = photo_base64;
        }

        let mut accounts = self.credential_repository.load_accounts().await?;
        if let Some(account) = accounts.get_mut(&profile.email) {
            account.name = profile.name.clone();
            account.country = profile.country.clone();
            account.photo_base64 = profile.photo_base64.clone();
            self.credential_repository.save_accounts(&accounts).await?;
        }
        self.credential_repository.save_session(&profile).await?;
        *session = Some(profile.clone());

        info!(email = %profile.email, "auth: profile updated");
        Ok(profile)
    }

    pub async fn update_password(&self, current: &str, new_password: &str) -> Result<(), AuthError> {
        check_new_password(new_password)?;

        let session = self.session.lock().await;
        let email = session
            .as_ref()
            .map(|profile| profile.email.clone())
            .ok_or(AuthError::NotSignedIn)?;

        let mut accounts = self.credential_repository.load_accounts().await?;
        let Some(account) = accounts.get_mut(&email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verify(current.to_string(), account.password_hash.clone()).await? {
            warn!(%email, "auth: password change with wrong current password");
            return Err(AuthError::InvalidCredentials);
        }

        account.password_hash = hash(new_password.to_string()).await?;
        self.credential_repository.save_accounts(&accounts).await?;

        info!(%email, "auth: password updated");
        Ok(())
    }

    /// Reports whether an account exists for `email`. Nothing is sent.
    pub async fn reset_password(&self, email: &str) -> Result<bool, AuthError> {
        required(email, "email")?;

        let email = normalize_email(email);
        let exists = self
            .credential_repository
            .load_accounts()
            .await?
            .contains_key(&email);

        debug!(%email, exists, "auth: password reset requested");
        Ok(exists)
    }
}
