use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Whatsapp,
    Twitter,
    Linkedin,
    Copy,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::Whatsapp => "whatsapp",
            SharePlatform::Twitter => "twitter",
            SharePlatform::Linkedin => "linkedin",
            SharePlatform::Copy => "copy",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Some(SharePlatform::Whatsapp),
            "twitter" => Some(SharePlatform::Twitter),
            "linkedin" => Some(SharePlatform::Linkedin),
            "copy" => Some(SharePlatform::Copy),
            _ => None,
        }
    }
}

impl Display for SharePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
