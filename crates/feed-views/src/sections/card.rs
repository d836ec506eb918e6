//! Feed card - one ranked report.

use feed_core::{FeedItem, Report};

/// Publication date as shown on cards, e.g. `1 Mar 2024`.
pub fn format_published(report: &Report) -> String {
    match report.published_date() {
        Some(date) => date.format("%-d %b %Y").to_string(),
        None => report.published_at.clone(),
    }
}

/// Render one card.
pub fn render_card(item: &FeedItem, show_signals: bool) -> String {
    let mut lines = vec![
        item.report.title.clone(),
        format!(
            "{} · {}    Score: {:.2}",
            item.report.category,
            format_published(&item.report),
            item.score
        ),
        format!("Why this: {}", item.reason),
    ];

    if let Some(why) = item.why_it_matters.as_deref().filter(|w| !w.is_empty()) {
        lines.push(format!("Why it matters: {}", why));
    }

    if !item.report.tags.is_empty() {
        let tags: Vec<String> = item.report.tags.iter().map(|t| format!("#{}", t)).collect();
        lines.push(tags.join(" "));
    }

    if show_signals {
        lines.push("Signal breakdown".to_string());
        for (name, value) in &item.signals {
            lines.push(format!("  {}: {}", name, value));
        }
    }

    lines.join("\n")
}
