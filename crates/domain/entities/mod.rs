pub mod events;
pub mod subscriptions;
pub mod users;
