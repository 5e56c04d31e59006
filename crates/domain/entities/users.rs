use serde::{Deserialize, Serialize};

/// Stored account. The password is only ever kept as an argon2 PHC string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_base64: Option<String>,
}

/// The signed-in user's profile, persisted as the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileEntity {
    pub name: String,
    pub email: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_base64: Option<String>,
}

impl From<&CredentialEntity> for UserProfileEntity {
    fn from(value: &CredentialEntity) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            country: value.country.clone(),
            photo_base64: value.photo_base64.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfileEntity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub photo_base64: Option<Option<String>>,
}
