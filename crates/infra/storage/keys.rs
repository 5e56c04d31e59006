//! Slot names. They match what existing installs already have on disk.

pub const SUBSCRIPTIONS: &str = "subcentral-subscriptions";
pub const TIER: &str = "subcentral-tier";
pub const LOCALE: &str = "subcentral-locale";
pub const USAGE_PROMPT_DONE: &str = "subcentral-vibe-date";
pub const USERS: &str = "subcentral-users";
pub const SESSION: &str = "subcentral-auth";
pub const FEEDBACK: &str = "subcentral-feedback";
pub const SHARE_LOGS: &str = "subcentral-share-logs";
