use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::subscription_statuses::SubscriptionStatus, last_used::LastUsed, next_billing,
};

/// A tracked subscription as it is persisted in the subscription slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionEntity {
    pub id: String,
    pub service: String,
    #[serde(default)]
    pub icon: String,
    pub status: SubscriptionStatus,
    #[serde(default, with = "next_billing")]
    pub next_billing: Option<NaiveDate>,
    pub monthly_cost: f64,
    #[serde(default)]
    pub last_used: LastUsed,
    #[serde(default)]
    pub current_month_usage: String,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_with: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Hours logged per prompted day, oldest first.
    #[serde(default)]
    pub daily_hours: Vec<f64>,
}

impl SubscriptionEntity {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    pub fn is_paused(&self) -> bool {
        self.status == SubscriptionStatus::Paused
    }

    pub fn days_inactive(&self) -> u32 {
        self.last_used.days_inactive()
    }
}

/// Everything a new subscription carries before the ledger assigns an id and a usage log.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSubscriptionEntity {
    pub service: String,
    pub icon: String,
    pub status: SubscriptionStatus,
    pub next_billing: Option<NaiveDate>,
    pub monthly_cost: f64,
    pub last_used: LastUsed,
    pub current_month_usage: String,
    pub shared_with: Vec<String>,
    pub category: String,
}

/// Partial update. `next_billing: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSubscriptionEntity {
    pub service: Option<String>,
    pub icon: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub next_billing: Option<Option<NaiveDate>>,
    pub monthly_cost: Option<f64>,
    pub shared_with: Option<Vec<String>>,
    pub category: Option<String>,
}

impl UpdateSubscriptionEntity {
    pub fn pause() -> Self {
        Self {
            status: Some(SubscriptionStatus::Paused),
            ..Default::default()
        }
    }

    pub fn resume(next_billing: Option<NaiveDate>) -> Self {
        Self {
            status: Some(SubscriptionStatus::Active),
            next_billing: Some(next_billing),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_layout_uses_legacy_field_names() {
        let entity = SubscriptionEntity {
            id: "6".to_string(),
            service: "Adobe CC".to_string(),
            icon: "🖌️".to_string(),
            status: SubscriptionStatus::Paused,
            next_billing: None,
            monthly_cost: 54.99,
            last_used: LastUsed::DaysAgo(45),
            current_month_usage: "0 hrs".to_string(),
            shared: false,
            shared_with: vec![],
            category: "Design".to_string(),
            daily_hours: vec![],
        };

        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["nextBilling"], "—");
        assert_eq!(value["monthlyCost"], 54.99);
        assert_eq!(value["lastUsed"], "45 days ago");
        assert_eq!(value["status"], "paused");
        assert!(value.get("sharedWith").is_none());
    }

    #[test]
    fn legacy_record_without_usage_log_loads() {
        let raw = r#"{
            "id": "1", "service": "Netflix", "icon": "🎬", "status": "active",
            "nextBilling": "2026-02-15", "monthlyCost": 15.99, "lastUsed": "Today",
            "currentMonthUsage": "42 hrs", "shared": true, "sharedWith": ["Alice", "Bob"],
            "category": "Entertainment"
        }"#;

        let entity: SubscriptionEntity = serde_json::from_str(raw).unwrap();
        assert_eq!(entity.next_billing, NaiveDate::from_ymd_opt(2026, 2, 15));
        assert_eq!(entity.shared_with, vec!["Alice", "Bob"]);
        assert!(entity.daily_hours.is_empty());
        assert_eq!(entity.last_used, LastUsed::Today);
    }
}
