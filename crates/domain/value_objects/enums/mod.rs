pub mod languages;
pub mod plans;
pub mod share_platforms;
pub mod subscription_statuses;
