//! In-memory owner of the subscription collection.
//!
//! The ledger stores and mutates records only. Tier ceilings and form
//! validation are checked by the callers before anything reaches it.

use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{
        InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
    },
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus, last_used::LastUsed,
        usage::{self, UsageSignal},
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionLedger {
    subscriptions: Vec<SubscriptionEntity>,
    selected_id: Option<String>,
}

impl SubscriptionLedger {
    pub fn new(subscriptions: Vec<SubscriptionEntity>) -> Self {
        Self {
            subscriptions,
            selected_id: None,
        }
    }

    /// Appends a new record with a fresh id and an empty usage log.
    pub fn add(&mut self, insert: InsertSubscriptionEntity) -> SubscriptionEntity {
        let mut id = Uuid::new_v4().to_string();
        while self.contains(&id) {
            id = Uuid::new_v4().to_string();
        }

        let entity = SubscriptionEntity {
            id,
            service: insert.service,
            icon: insert.icon,
            status: insert.status,
            next_billing: match insert.status {
                SubscriptionStatus::Paused => None,
                SubscriptionStatus::Active => insert.next_billing,
            },
            monthly_cost: insert.monthly_cost,
            last_used: insert.last_used,
            current_month_usage: insert.current_month_usage,
            shared: !insert.shared_with.is_empty(),
            shared_with: insert.shared_with,
            category: insert.category,
            daily_hours: Vec::new(),
        };

        self.subscriptions.push(entity.clone());
        entity
    }

    /// Merges the given fields into the record. Returns `None` when the id is unknown.
    pub fn update(&mut self, id: &str, update: UpdateSubscriptionEntity) -> Option<SubscriptionEntity> {
        let entity = self.subscriptions.iter_mut().find(|entity| entity.id == id)?;

        if let Some(service) = update.service {
            entity.service = service;
        }
        if let Some(icon) = update.icon {
            entity.icon = icon;
        }
        if let Some(category) = update.category {
            entity.category = category;
        }
        if let Some(monthly_cost) = update.monthly_cost {
            entity.monthly_cost = monthly_cost;
        }
        if let Some(shared_with) = update.shared_with {
            entity.shared = !shared_with.is_empty();
            entity.shared_with = shared_with;
        }
        if let Some(next_billing) = update.next_billing {
            entity.next_billing = next_billing;
        }
        if let Some(status) = update.status {
            entity.status = status;
        }
        if entity.status == SubscriptionStatus::Paused {
            entity.next_billing = None;
        }

        Some(entity.clone())
    }

    /// Removes the record and clears the selection if it pointed at it.
    pub fn delete(&mut self, id: &str) -> Option<SubscriptionEntity> {
        let index = self.subscriptions.iter().position(|entity| entity.id == id)?;
        let removed = self.subscriptions.remove(index);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Some(removed)
    }

    /// Appends one day's answer to the usage log and refreshes the derived fields.
    pub fn log_usage(&mut self, id: &str, signal: UsageSignal) -> Option<SubscriptionEntity> {
        let entity = self.subscriptions.iter_mut().find(|entity| entity.id == id)?;

        entity.daily_hours.push(signal.value());
        if signal.indicates_use() {
            entity.last_used = LastUsed::Today;
        }
        entity.current_month_usage = usage::usage_summary(&entity.daily_hours);

        Some(entity.clone())
    }

    /// Snapshot in insertion order.
    pub fn list_all(&self) -> Vec<SubscriptionEntity> {
        self.subscriptions.clone()
    }

    pub fn as_slice(&self) -> &[SubscriptionEntity] {
        &self.subscriptions
    }

    pub fn get(&self, id: &str) -> Option<&SubscriptionEntity> {
        self.subscriptions.iter().find(|entity| entity.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn select(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn selected(&self) -> Option<&SubscriptionEntity> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }
}

pub fn active(subscriptions: &[SubscriptionEntity]) -> Vec<&SubscriptionEntity> {
    subscriptions.iter().filter(|entity| entity.is_active()).collect()
}

pub fn paused(subscriptions: &[SubscriptionEntity]) -> Vec<&SubscriptionEntity> {
    subscriptions.iter().filter(|entity| entity.is_paused()).collect()
}

pub fn shared(subscriptions: &[SubscriptionEntity]) -> Vec<&SubscriptionEntity> {
    subscriptions.iter().filter(|entity| entity.shared).collect()
}

/// Active records unused for at least `threshold_days`.
pub fn inactive_for(subscriptions: &[SubscriptionEntity], threshold_days: u32) -> Vec<&SubscriptionEntity> {
    subscriptions
        .iter()
        .filter(|entity| entity.is_active() && entity.days_inactive() >= threshold_days)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn insert(service: &str, cost: f64, status: SubscriptionStatus) -> InsertSubscriptionEntity {
        InsertSubscriptionEntity {
            service: service.to_string(),
            icon: String::new(),
            status,
            next_billing: NaiveDate::from_ymd_opt(2026, 3, 1),
            monthly_cost: cost,
            last_used: LastUsed::Never,
            current_month_usage: "0 hrs".to_string(),
            shared_with: vec![],
            category: "Other".to_string(),
        }
    }

    #[test]
    fn add_assigns_id_and_empty_log() {
        let mut ledger = SubscriptionLedger::default();
        let input = insert("Netflix", 15.99, SubscriptionStatus::Active);

        let created = ledger.add(input.clone());
        let all = ledger.list_all();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
        assert!(!created.id.is_empty());
        assert!(created.daily_hours.is_empty());
        assert_eq!(created.service, input.service);
        assert_eq!(created.monthly_cost, input.monthly_cost);
        assert_eq!(created.next_billing, input.next_billing);
        assert!(!created.shared);
    }

    #[test]
    fn ids_are_unique() {
        let mut ledger = SubscriptionLedger::default();
        let first = ledger.add(insert("A", 1.0, SubscriptionStatus::Active));
        let second = ledger.add(insert("B", 2.0, SubscriptionStatus::Active));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut ledger = SubscriptionLedger::default();
        for name in ["C", "A", "B"] {
            ledger.add(insert(name, 1.0, SubscriptionStatus::Active));
        }
        let names: Vec<String> = ledger.list_all().into_iter().map(|entity| entity.service).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn pausing_clears_next_billing() {
        let mut ledger = SubscriptionLedger::default();
        let created = ledger.add(insert("Figma", 12.0, SubscriptionStatus::Active));
        assert!(created.next_billing.is_some());

        let updated = ledger
            .update(&created.id, UpdateSubscriptionEntity::pause())
            .unwrap();
        assert_eq!(updated.status, SubscriptionStatus::Paused);
        assert_eq!(updated.next_billing, None);
    }

    #[test]
    fn paused_record_ignores_billing_date_in_same_update() {
        let mut ledger = SubscriptionLedger::default();
        let created = ledger.add(insert("Figma", 12.0, SubscriptionStatus::Active));
        let update = UpdateSubscriptionEntity {
            status: Some(SubscriptionStatus::Paused),
            next_billing: Some(NaiveDate::from_ymd_opt(2027, 1, 1)),
            ..Default::default()
        };
        let updated = ledger.update(&created.id, update).unwrap();
        assert_eq!(updated.next_billing, None);
    }

    #[test]
    fn update_unknown_id_is_none_and_changes_nothing() {
        let mut ledger = SubscriptionLedger::default();
        ledger.add(insert("Figma", 12.0, SubscriptionStatus::Active));
        let before = ledger.clone();

        assert!(ledger.update("missing", UpdateSubscriptionEntity::pause()).is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn delete_clears_selection() {
        let mut ledger = SubscriptionLedger::default();
        let created = ledger.add(insert("Notion", 8.0, SubscriptionStatus::Active));
        assert!(ledger.select(&created.id));

        let removed = ledger.delete(&created.id).unwrap();
        assert_eq!(removed.id, created.id);
        assert!(ledger.selected().is_none());
        assert!(ledger.list_all().iter().all(|entity| entity.id != created.id));
    }

    #[test]
    fn delete_keeps_other_selection() {
        let mut ledger = SubscriptionLedger::default();
        let first = ledger.add(insert("A", 1.0, SubscriptionStatus::Active));
        let second = ledger.add(insert("B", 1.0, SubscriptionStatus::Active));
        ledger.select(&first.id);

        ledger.delete(&second.id);
        assert_eq!(ledger.selected_id(), Some(first.id.as_str()));
    }

    #[test]
    fn log_usage_appends_and_marks_today() {
        let mut ledger = SubscriptionLedger::default();
        let created = ledger.add(insert("Spotify", 9.99, SubscriptionStatus::Active));

        ledger.log_usage(&created.id, UsageSignal::hours(1.5).unwrap());
        let updated = ledger
            .log_usage(&created.id, UsageSignal::hours(2.0).unwrap())
            .unwrap();

        assert_eq!(updated.daily_hours, vec![1.5, 2.0]);
        assert_eq!(updated.last_used, LastUsed::Today);
        assert_eq!(updated.current_month_usage, "3.5 hrs");
    }

    #[test]
    fn zero_hours_is_logged_without_touching_last_used() {
        let mut ledger = SubscriptionLedger::default();
        let created = ledger.add(insert("Spotify", 9.99, SubscriptionStatus::Active));

        let updated = ledger
            .log_usage(&created.id, UsageSignal::hours(0.0).unwrap())
            .unwrap();
        assert_eq!(updated.daily_hours, vec![0.0]);
        assert_eq!(updated.last_used, LastUsed::Never);
    }

    #[test]
    fn subsets_are_derived_from_status() {
        let mut ledger = SubscriptionLedger::default();
        ledger.add(insert("A", 1.0, SubscriptionStatus::Active));
        let mut shared_input = insert("B", 1.0, SubscriptionStatus::Paused);
        shared_input.shared_with = vec!["Alice".to_string()];
        ledger.add(shared_input);

        let all = ledger.list_all();
        assert_eq!(active(&all).len(), 1);
        assert_eq!(paused(&all).len(), 1);
        assert_eq!(shared(&all)[0].service, "B");
        assert_eq!(inactive_for(&all, 30).len(), 1);
    }
}
