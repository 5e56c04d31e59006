//! Pure figures derived from a ledger snapshot. Nothing here is cached; every
//! caller recomputes from the records it holds.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{entities::subscriptions::SubscriptionEntity, ledger};

/// Days without use after which an active subscription counts as wasted money.
pub const WASTE_THRESHOLD_DAYS: u32 = 30;

/// Length of the window the renewal progress bar fills over.
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Renewals this close show up in the upcoming list.
pub const UPCOMING_RENEWAL_DAYS: i64 = 7;

pub const RECENT_USAGE_POINTS: usize = 7;

pub fn monthly_spend(subscriptions: &[SubscriptionEntity]) -> f64 {
    ledger::active(subscriptions)
        .into_iter()
        .map(|entity| entity.monthly_cost)
        .sum()
}

/// What paused subscriptions would otherwise cost each month.
pub fn savings_realized(subscriptions: &[SubscriptionEntity]) -> f64 {
    ledger::paused(subscriptions)
        .into_iter()
        .map(|entity| entity.monthly_cost)
        .sum()
}

pub fn waste(subscriptions: &[SubscriptionEntity]) -> f64 {
    ledger::inactive_for(subscriptions, WASTE_THRESHOLD_DAYS)
        .into_iter()
        .map(|entity| entity.monthly_cost)
        .sum()
}

pub fn annual_projection(subscriptions: &[SubscriptionEntity]) -> f64 {
    monthly_spend(subscriptions) * 12.0
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

/// Active spend per category, largest first, ties broken by name.
pub fn category_breakdown(subscriptions: &[SubscriptionEntity]) -> Vec<CategorySpend> {
    let mut breakdown: Vec<CategorySpend> = Vec::new();
    for entity in ledger::active(subscriptions) {
        match breakdown
            .iter_mut()
            .find(|spend| spend.category == entity.category)
        {
            Some(spend) => spend.amount += entity.monthly_cost,
            None => breakdown.push(CategorySpend {
                category: entity.category.clone(),
                amount: entity.monthly_cost,
            }),
        }
    }

    breakdown.sort_by(|left, right| {
        right
            .amount
            .total_cmp(&left.amount)
            .then_with(|| left.category.cmp(&right.category))
    });
    breakdown
}

/// Signed whole days from `today` until `date`.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Days left before renewal, clamped at zero. `None` when there is no billing date.
pub fn renewal_countdown(entity: &SubscriptionEntity, today: NaiveDate) -> Option<i64> {
    entity
        .next_billing
        .map(|date| days_until(date, today).max(0))
}

/// How far through the renewal window we are, 0 to 100.
pub fn renewal_progress(days_left: i64) -> f64 {
    let progress = (RENEWAL_WINDOW_DAYS - days_left) as f64 / RENEWAL_WINDOW_DAYS as f64 * 100.0;
    progress.clamp(0.0, 100.0)
}

/// Result of dividing cost by usage. `NoData` when nothing has been logged.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CostPerUnit {
    Amount(f64),
    NoData,
}

impl CostPerUnit {
    pub fn amount(&self) -> Option<f64> {
        match self {
            CostPerUnit::Amount(value) => Some(*value),
            CostPerUnit::NoData => None,
        }
    }
}

pub fn cost_per_hour(entity: &SubscriptionEntity) -> CostPerUnit {
    let hours: f64 = entity.daily_hours.iter().sum();
    if hours <= 0.0 {
        return CostPerUnit::NoData;
    }
    CostPerUnit::Amount(entity.monthly_cost / hours)
}

/// Cost per 24 logged hours.
pub fn cost_per_day(entity: &SubscriptionEntity) -> CostPerUnit {
    let days = entity.daily_hours.iter().sum::<f64>() / 24.0;
    if days <= 0.0 {
        return CostPerUnit::NoData;
    }
    CostPerUnit::Amount(entity.monthly_cost / days)
}

pub fn is_wasting(entity: &SubscriptionEntity) -> bool {
    entity.is_active() && entity.days_inactive() >= WASTE_THRESHOLD_DAYS
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenewalUrgency {
    Critical,
    Soon,
    Upcoming,
}

impl RenewalUrgency {
    pub fn from_days(days: i64) -> Self {
        match days {
            ..=1 => RenewalUrgency::Critical,
            2..=3 => RenewalUrgency::Soon,
            _ => RenewalUrgency::Upcoming,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub id: String,
    pub service: String,
    pub icon: String,
    pub monthly_cost: f64,
    pub days_until: i64,
    pub urgency: RenewalUrgency,
    /// Share of the upcoming window already elapsed, 0 to 100.
    pub progress: f64,
}

/// Active renewals due within the next week, soonest first.
pub fn upcoming_renewals(subscriptions: &[SubscriptionEntity], today: NaiveDate) -> Vec<UpcomingRenewal> {
    let mut upcoming: Vec<UpcomingRenewal> = ledger::active(subscriptions)
        .into_iter()
        .filter_map(|entity| {
            let days = days_until(entity.next_billing?, today);
            if !(0..=UPCOMING_RENEWAL_DAYS).contains(&days) {
                return None;
            }
            Some(UpcomingRenewal {
                id: entity.id.clone(),
                service: entity.service.clone(),
                icon: entity.icon.clone(),
                monthly_cost: entity.monthly_cost,
                days_until: days,
                urgency: RenewalUrgency::from_days(days),
                progress: ((UPCOMING_RENEWAL_DAYS - days) as f64 / UPCOMING_RENEWAL_DAYS as f64 * 100.0)
                    .max(0.0),
            })
        })
        .collect();

    upcoming.sort_by_key(|renewal| renewal.days_until);
    upcoming
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowUsageAlert {
    pub id: String,
    pub service: String,
    pub icon: String,
    pub last_used: String,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowUsageReport {
    pub alerts: Vec<LowUsageAlert>,
    /// Monthly amount saved if every flagged subscription were paused.
    pub potential_savings: f64,
}

pub fn low_usage_report(subscriptions: &[SubscriptionEntity]) -> LowUsageReport {
    let alerts: Vec<LowUsageAlert> = ledger::inactive_for(subscriptions, WASTE_THRESHOLD_DAYS)
        .into_iter()
        .map(|entity| LowUsageAlert {
            id: entity.id.clone(),
            service: entity.service.clone(),
            icon: entity.icon.clone(),
            last_used: entity.last_used.to_string(),
            monthly_cost: entity.monthly_cost,
        })
        .collect();
    let potential_savings = alerts.iter().map(|alert| alert.monthly_cost).sum();

    LowUsageReport {
        alerts,
        potential_savings,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsagePoint {
    pub label: String,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInsight {
    pub id: String,
    pub service: String,
    pub category: String,
    pub total_hours: f64,
    pub total_days: f64,
    pub cost_per_hour: CostPerUnit,
    pub cost_per_day: CostPerUnit,
    pub renewal_days_left: Option<i64>,
    pub renewal_progress: f64,
    pub wasting: bool,
    pub recent_usage: Vec<UsagePoint>,
}

/// Per-subscription deep dive.
pub fn subscription_insight(entity: &SubscriptionEntity, today: NaiveDate) -> SubscriptionInsight {
    let total_hours: f64 = entity.daily_hours.iter().sum();
    let renewal_days_left = renewal_countdown(entity, today);
    let recent_start = entity.daily_hours.len().saturating_sub(RECENT_USAGE_POINTS);
    let recent_usage = entity.daily_hours[recent_start..]
        .iter()
        .enumerate()
        .map(|(index, hours)| UsagePoint {
            label: format!("D{}", index + 1),
            hours: *hours,
        })
        .collect();

    SubscriptionInsight {
        id: entity.id.clone(),
        service: entity.service.clone(),
        category: entity.category.clone(),
        total_hours,
        total_days: total_hours / 24.0,
        cost_per_hour: cost_per_hour(entity),
        cost_per_day: cost_per_day(entity),
        renewal_days_left,
        renewal_progress: renewal_days_left.map(renewal_progress).unwrap_or(0.0),
        wasting: is_wasting(entity),
        recent_usage,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendSummary {
    pub monthly_spend: f64,
    pub active_count: usize,
    pub paused_count: usize,
    pub savings_realized: f64,
    pub waste: f64,
    pub annual_projection: f64,
    pub categories: Vec<CategorySpend>,
}

pub fn spend_summary(subscriptions: &[SubscriptionEntity]) -> SpendSummary {
    SpendSummary {
        monthly_spend: monthly_spend(subscriptions),
        active_count: ledger::active(subscriptions).len(),
        paused_count: ledger::paused(subscriptions).len(),
        savings_realized: savings_realized(subscriptions),
        waste: waste(subscriptions),
        annual_projection: annual_projection(subscriptions),
        categories: category_breakdown(subscriptions),
    }
}
