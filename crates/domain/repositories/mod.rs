pub mod credentials;
pub mod events;
pub mod key_value;
pub mod locales;
pub mod subscriptions;
pub mod tiers;
pub mod usage_prompt;
