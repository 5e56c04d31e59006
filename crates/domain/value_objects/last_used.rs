use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// When a subscription was last used, relative to the day it was recorded.
///
/// Persisted as the human strings `Today`, `Yesterday`, `N days ago` and `Never`
/// so existing stores keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastUsed {
    Today,
    Yesterday,
    DaysAgo(u32),
    #[default]
    Never,
}

impl LastUsed {
    pub fn days_inactive(&self) -> u32 {
        match self {
            LastUsed::Today => 0,
            LastUsed::Yesterday => 1,
            LastUsed::DaysAgo(days) => *days,
            LastUsed::Never => u32::MAX,
        }
    }

    /// Lenient parse of the stored marker. Anything unrecognised counts as zero days.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "today" => return LastUsed::Today,
            "yesterday" => return LastUsed::Yesterday,
            "never" => return LastUsed::Never,
            _ => {}
        }

        let mut parts = trimmed.split_whitespace();
        let days = parts.next().and_then(|value| value.parse::<u32>().ok());
        let unit = parts.next().map(|value| value.to_ascii_lowercase());
        let suffix = parts.next().map(|value| value.to_ascii_lowercase());

        match (days, unit.as_deref(), suffix.as_deref()) {
            (Some(days), Some("day" | "days"), Some("ago")) => LastUsed::DaysAgo(days),
            _ => LastUsed::DaysAgo(0),
        }
    }
}

impl Display for LastUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastUsed::Today => f.write_str("Today"),
            LastUsed::Yesterday => f.write_str("Yesterday"),
            LastUsed::DaysAgo(1) => f.write_str("1 day ago"),
            LastUsed::DaysAgo(days) => write!(f, "{} days ago", days),
            LastUsed::Never => f.write_str("Never"),
        }
    }
}

impl Serialize for LastUsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LastUsed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LastUsed::parse(&raw))
    }
}
