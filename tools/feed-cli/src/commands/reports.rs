//! List raw reports.

use anyhow::{Context as _, Result};
use console::style;
use feed_core::normalize_category;
use feed_views::format_published;

use super::ReportsArgs;
use crate::context::Context;

/// Run the reports command.
pub async fn run(args: ReportsArgs, ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    let gateway = ctx.gateway()?;

    let spinner = ctx.output.spinner("Loading reports...");
    let reports = gateway.reports().await;
    spinner.finish_and_clear();
    let mut reports = reports.context("Failed to load reports")?;

    if let Some(category) = normalize_category(args.category.as_deref()) {
        reports.retain(|r| r.category.eq_ignore_ascii_case(&category));
    }
    if let Some(limit) = args.limit {
        reports.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&reports);
        return Ok(());
    }

    if reports.is_empty() {
        ctx.output.info("No reports found.");
        return Ok(());
    }

    ctx.output.header(&format!("Reports ({})", reports.len()));
    for report in &reports {
        ctx.output.list_item(&format!(
            "{}  {}",
            report.title,
            style(format!("{} · {}", report.category, format_published(report))).dim()
        ));
    }
    Ok(())
}
