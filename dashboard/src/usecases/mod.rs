pub mod analytics;
pub mod auth;
pub mod export;
pub mod feedback;
pub mod locales;
pub mod subscriptions;
pub mod tiers;
pub mod usage_prompt;
