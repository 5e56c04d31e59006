use anyhow::{Result, bail};

pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// One day's usage answer, in hours. Zero means the service went unused that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSignal(f64);

impl UsageSignal {
    pub fn hours(hours: f64) -> Result<Self> {
        if !hours.is_finite() {
            bail!("usage hours must be a finite number");
        }
        if !(0.0..=MAX_HOURS_PER_DAY).contains(&hours) {
            bail!("usage hours must be between 0 and {}", MAX_HOURS_PER_DAY);
        }
        Ok(Self(hours))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn indicates_use(&self) -> bool {
        self.0 > 0.0
    }
}

pub fn total_hours(log: &[f64]) -> f64 {
    log.iter().sum()
}

/// Human summary of a usage log, e.g. `12.5 hrs`.
pub fn usage_summary(log: &[f64]) -> String {
    format!("{} hrs", format_hours(total_hours(log)))
}

/// Prints whole numbers without a fractional part and trims trailing zeros otherwise.
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
