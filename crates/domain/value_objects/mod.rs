pub mod enums;
pub mod export;
pub mod last_used;
pub mod locales;
pub mod metrics;
pub mod next_billing;
pub mod plans;
pub mod prompt_questions;
pub mod subscriptions;
pub mod usage;
pub mod usage_prompt;
