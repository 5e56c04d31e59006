use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Closed set of pricing plans. The serialized ids are what the tier slot stores.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Plan {
    #[default]
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "premium")]
    Premium,
    #[serde(rename = "premiumPlus")]
    PremiumPlus,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Premium, Plan::PremiumPlus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
            Plan::PremiumPlus => "premiumPlus",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "basic" => Some(Plan::Basic),
            "premium" => Some(Plan::Premium),
            "premiumPlus" => Some(Plan::PremiumPlus),
            _ => None,
        }
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
