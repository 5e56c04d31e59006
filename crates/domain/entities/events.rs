use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::share_platforms::SharePlatform;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEventEntity {
    pub rating: u8,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareEventEntity {
    pub platform: SharePlatform,
    pub timestamp: DateTime<Utc>,
}
