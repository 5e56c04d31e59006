pub mod credentials;
pub mod events;
pub mod locales;
pub mod subscriptions;
pub mod tiers;
pub mod usage_prompt;
