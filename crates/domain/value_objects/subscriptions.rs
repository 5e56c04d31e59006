use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, UpdateSubscriptionEntity},
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus, last_used::LastUsed, next_billing,
        usage,
    },
};

pub const DEFAULT_CATEGORY: &str = "Other";

pub const CATEGORIES: [&str; 13] = [
    "Entertainment",
    "Music",
    "Design",
    "AI",
    "Dev Tools",
    "Productivity",
    "Storage",
    "Career",
    "Writing",
    "Finance",
    "Health",
    "Education",
    "Other",
];

const KNOWN_ICONS: [(&str, &str); 20] = [
    ("netflix", "🎬"),
    ("spotify", "🎵"),
    ("figma", "🎨"),
    ("chatgpt", "🤖"),
    ("github", "💻"),
    ("adobe", "🖌️"),
    ("notion", "📝"),
    ("icloud", "☁️"),
    ("linkedin", "💼"),
    ("grammarly", "✍️"),
    ("youtube", "📺"),
    ("slack", "💬"),
    ("discord", "🎮"),
    ("zoom", "📹"),
    ("dropbox", "📦"),
    ("canva", "🎯"),
    ("trello", "📋"),
    ("aws", "🌐"),
    ("heroku", "🚀"),
    ("vercel", "▲"),
];

/// Emoji for well-known services, matched case-insensitively on a substring of the name.
pub fn icon_for(service: &str) -> String {
    let lower = service.to_lowercase();
    KNOWN_ICONS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, icon)| icon.to_string())
        .unwrap_or_default()
}

#[derive(Debug, Error, PartialEq)]
pub enum FormValidationError {
    #[error("service name is required")]
    MissingName,
    #[error("monthly cost is required")]
    MissingCost,
    #[error("monthly cost must be a number, got {0:?}")]
    NonNumericCost(String),
    #[error("monthly cost cannot be negative")]
    NegativeCost,
    #[error("renewal date must be formatted YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
    #[error("renewal date {0} cannot be in the past")]
    PastRenewal(NaiveDate),
}

/// Raw add/edit input as the user typed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionForm {
    pub name: String,
    pub category: String,
    pub cost: String,
    pub renewal: String,
    /// Comma-separated co-sharer names.
    pub shared: String,
    pub status: SubscriptionStatus,
}

/// A form that passed validation against the day it was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubscription {
    pub service: String,
    pub icon: String,
    pub category: String,
    pub monthly_cost: f64,
    pub status: SubscriptionStatus,
    pub next_billing: Option<NaiveDate>,
    pub shared_with: Vec<String>,
}

impl SubscriptionForm {
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedSubscription, FormValidationError> {
        let service = self.name.trim();
        if service.is_empty() {
            return Err(FormValidationError::MissingName);
        }

        let monthly_cost = parse_cost(&self.cost)?;

        let next_billing = match self.status {
            SubscriptionStatus::Paused => None,
            SubscriptionStatus::Active => parse_renewal(&self.renewal, today)?,
        };

        let category = normalize_category(&self.category);

        Ok(ValidatedSubscription {
            service: service.to_string(),
            icon: icon_for(service),
            category,
            monthly_cost,
            status: self.status,
            next_billing,
            shared_with: split_sharers(&self.shared),
        })
    }
}

impl ValidatedSubscription {
    pub fn into_insert(self) -> InsertSubscriptionEntity {
        InsertSubscriptionEntity {
            service: self.service,
            icon: self.icon,
            status: self.status,
            next_billing: self.next_billing,
            monthly_cost: self.monthly_cost,
            last_used: LastUsed::Never,
            current_month_usage: usage::usage_summary(&[]),
            shared_with: self.shared_with,
            category: self.category,
        }
    }

    /// Full-field edit. Usage history and the last-used marker are left alone.
    pub fn into_update(self) -> UpdateSubscriptionEntity {
        UpdateSubscriptionEntity {
            service: Some(self.service),
            icon: Some(self.icon),
            status: Some(self.status),
            next_billing: Some(self.next_billing),
            monthly_cost: Some(self.monthly_cost),
            shared_with: Some(self.shared_with),
            category: Some(self.category),
        }
    }
}

pub fn parse_cost(raw: &str) -> Result<f64, FormValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormValidationError::MissingCost);
    }
    let cost: f64 = trimmed
        .parse()
        .map_err(|_| FormValidationError::NonNumericCost(trimmed.to_string()))?;
    if !cost.is_finite() {
        return Err(FormValidationError::NonNumericCost(trimmed.to_string()));
    }
    validate_cost(cost)
}

pub fn validate_cost(cost: f64) -> Result<f64, FormValidationError> {
    if !cost.is_finite() {
        return Err(FormValidationError::NonNumericCost(cost.to_string()));
    }
    if cost < 0.0 {
        return Err(FormValidationError::NegativeCost);
    }
    Ok(cost)
}

pub fn parse_renewal(raw: &str, today: NaiveDate) -> Result<Option<NaiveDate>, FormValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == next_billing::NOT_APPLICABLE {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, next_billing::DATE_FORMAT)
        .map_err(|_| FormValidationError::InvalidDate(trimmed.to_string()))?;
    validate_renewal(Some(date), today)
}

pub fn validate_renewal(
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, FormValidationError> {
    match date {
        Some(date) if date < today => Err(FormValidationError::PastRenewal(date)),
        other => Ok(other),
    }
}

/// Blank becomes [`DEFAULT_CATEGORY`]; a known category in any casing takes the
/// canonical spelling from [`CATEGORIES`]; anything else is kept as typed.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_CATEGORY.to_string();
    }
    CATEGORIES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .map(|known| known.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

pub fn split_sharers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
