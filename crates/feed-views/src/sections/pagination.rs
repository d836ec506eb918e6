//! Pagination section - position summary and previous/next controls.

/// Render the pagination bar. Disabled controls are shown with `[-]`.
pub fn render_pagination(page: u32, total_pages: u32, total_items: u32) -> String {
    let previous = if page > 1 { "[p]" } else { "[-]" };
    let next = if page < total_pages { "[n]" } else { "[-]" };
    format!(
        "Page {} of {} ({} items)    {} Previous  {} Next",
        page, total_pages, total_items, previous, next
    )
}
