use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::plans::Plan;

/// Plan every session starts on when nothing valid is stored.
pub const DEFAULT_PLAN: Plan = Plan::Basic;

/// Entitlements attached to a plan. `max_subscriptions: None` means unlimited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    pub max_subscriptions: Option<usize>,
    pub analytics: bool,
    pub data_export: bool,
    pub billing_download: bool,
    pub low_usage_alerts: bool,
    pub monthly_summary: bool,
    pub priority_support: bool,
}

impl TierLimits {
    pub fn for_plan(plan: Plan) -> Self {
        match plan {
            Plan::Basic => TierLimits {
                max_subscriptions: Some(4),
                analytics: false,
                data_export: false,
                billing_download: false,
                low_usage_alerts: false,
                monthly_summary: false,
                priority_support: false,
            },
            Plan::Premium => TierLimits {
                max_subscriptions: Some(10),
                analytics: true,
                data_export: false,
                billing_download: false,
                low_usage_alerts: true,
                monthly_summary: true,
                priority_support: true,
            },
            Plan::PremiumPlus => TierLimits {
                max_subscriptions: None,
                analytics: true,
                data_export: true,
                billing_download: true,
                low_usage_alerts: true,
                monthly_summary: true,
                priority_support: true,
            },
        }
    }

    /// Admission check for one more subscription given how many already exist.
    pub fn can_add(&self, current_count: usize) -> bool {
        match self.max_subscriptions {
            None => true,
            Some(max) => current_count < max,
        }
    }

    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::Analytics => self.analytics,
            Feature::DataExport => self.data_export,
            Feature::BillingDownload => self.billing_download,
            Feature::LowUsageAlerts => self.low_usage_alerts,
            Feature::MonthlySummary => self.monthly_summary,
            Feature::PrioritySupport => self.priority_support,
        }
    }
}

/// Features that can be locked behind a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Analytics,
    DataExport,
    BillingDownload,
    LowUsageAlerts,
    MonthlySummary,
    PrioritySupport,
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Feature::Analytics => "analytics",
            Feature::DataExport => "data export",
            Feature::BillingDownload => "invoice download",
            Feature::LowUsageAlerts => "low usage alerts",
            Feature::MonthlySummary => "monthly summary",
            Feature::PrioritySupport => "priority support",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TierDto {
    pub id: Plan,
    pub name: &'static str,
    pub price: &'static str,
    pub limits: TierLimits,
}

impl From<Plan> for TierDto {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan,
            name: plan_name(plan),
            price: plan_price(plan),
            limits: TierLimits::for_plan(plan),
        }
    }
}

pub fn plan_name(plan: Plan) -> &'static str {
    match plan {
        Plan::Basic => "Basic (Free)",
        Plan::Premium => "Premium",
        Plan::PremiumPlus => "Premium+",
    }
}

pub fn plan_price(plan: Plan) -> &'static str {
    match plan {
        Plan::Basic => "$0/year",
        Plan::Premium => "$15/year",
        Plan::PremiumPlus => "$25/year",
    }
}

pub fn all_tiers() -> Vec<TierDto> {
    Plan::ALL.into_iter().map(TierDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_plan_caps_at_four() {
        let limits = TierLimits::for_plan(Plan::Basic);
        assert!(limits.can_add(3));
        assert!(!limits.can_add(4));
        assert!(!limits.can_add(50));
    }

    #[test]
    fn premium_plan_caps_at_ten() {
        let limits = TierLimits::for_plan(Plan::Premium);
        assert!(limits.can_add(9));
        assert!(!limits.can_add(10));
    }

    #[test]
    fn unlimited_plan_always_admits() {
        let limits = TierLimits::for_plan(Plan::PremiumPlus);
        assert!(limits.can_add(0));
        assert!(limits.can_add(10_000));
    }

    #[test]
    fn feature_flags_follow_plan_table() {
        let basic = TierLimits::for_plan(Plan::Basic);
        let premium = TierLimits::for_plan(Plan::Premium);
        let plus = TierLimits::for_plan(Plan::PremiumPlus);

        assert!(!basic.allows(Feature::Analytics));
        assert!(premium.allows(Feature::Analytics));
        assert!(!premium.allows(Feature::DataExport));
        assert!(plus.allows(Feature::DataExport));
        assert!(plus.allows(Feature::BillingDownload));
    }

    #[test]
    fn all_tiers_are_listed_in_order() {
        let tiers = all_tiers();
        let ids: Vec<Plan> = tiers.iter().map(|tier| tier.id).collect();
        assert_eq!(ids, vec![Plan::Basic, Plan::Premium, Plan::PremiumPlus]);
        assert_eq!(tiers[2].name, "Premium+");
    }
}
