pub mod config;
pub mod context;
pub mod usecases;

use std::sync::Arc;

use anyhow::Result;
use subcentral::domain::clock::SystemClock;
use tracing::{info, warn};

use crate::{context::AppContext, usecases::export::ExportError};

pub async fn run() -> Result<()> {
    let dotenvy_env = config::config_loader::load()?;
    info!(stage = %dotenvy_env.stage, "ENV has been loaded");

    let context = AppContext::build(&dotenvy_env, Arc::new(SystemClock)).await?;
    info!("Application context has been built");

    let country = context.locale.current().await;
    let plan = context.tiers.current_plan().await;
    let summary = context.analytics.dashboard_summary().await;
    info!(
        %plan,
        active = summary.active_count,
        paused = summary.paused_count,
        monthly_spend = %country.format_currency(summary.monthly_spend),
        savings = %country.format_currency(summary.savings_realized),
        waste = %country.format_currency(summary.waste),
        annual_projection = %country.format_currency(summary.annual_projection),
        "dashboard: spend summary"
    );

    for renewal in context.analytics.upcoming_renewals().await {
        info!(
            service = %renewal.service,
            days_until = renewal.days_until,
            urgency = ?renewal.urgency,
            amount = %country.format_currency(renewal.monthly_cost),
            "dashboard: upcoming renewal"
        );
    }

    if context.usage_prompt.is_due().await? {
        info!("dashboard: usage check is due today");
    }

    if let Some(path) = &dotenvy_env.export.csv_path {
        match context.export.write_csv(path).await {
            Ok(csv) => info!(path = %path.display(), rows = csv.rows, "dashboard: export written"),
            Err(ExportError::EntitlementDenied(err)) => {
                warn!(error = %err, "dashboard: export skipped for current plan")
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
