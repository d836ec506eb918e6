//! Filters section - user, category and the signal toggle.

use feed_core::{User, CATEGORIES};

/// Label of the "every category" option.
pub const ALL_CATEGORIES: &str = "All";

/// Labels for the user picker, in list order.
pub fn user_options(users: &[User]) -> Vec<String> {
    users.iter().map(User::label).collect()
}

/// Labels for the category picker. The first entry means no filter.
pub fn category_options() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(CATEGORIES.iter().copied())
        .collect()
}

/// Text of the signal toggle: the action it performs next.
pub fn signals_toggle_label(show_signals: bool) -> &'static str {
    if show_signals {
        "Hide breakdown"
    } else {
        "Show breakdown"
    }
}

/// Render the filters section.
pub fn render_filters(
    users: &[User],
    selected_user_id: Option<&str>,
    category: Option<&str>,
    show_signals: bool,
) -> String {
    let user = selected_user_id
        .and_then(|id| users.iter().find(|u| u.id == id))
        .map(User::label)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "[u] User: {}\n[c] Category filter: {}\n[s] {}",
        user,
        category.unwrap_or(ALL_CATEGORIES),
        signals_toggle_label(show_signals)
    )
}
