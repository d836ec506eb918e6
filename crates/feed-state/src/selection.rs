//! User-driven feed selection.

use feed_core::{clamp_page, normalize_category, QueryKey, User};

/// What the reader has picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Explicitly chosen user. `None` means the first user in the list.
    pub selected_user_id: Option<String>,
    /// Category filter. `None` means all categories.
    pub category: Option<String>,
    /// Current page (1-indexed).
    pub page: u32,
    /// Whether signal breakdowns are shown. Never part of the query key.
    pub show_signals: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            selected_user_id: None,
            category: None,
            page: 1,
            show_signals: false,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a user and go back to the first page.
    pub fn select_user(&mut self, user_id: impl Into<String>) {
        self.selected_user_id = Some(user_id.into());
        self.page = 1;
    }

    /// Pick a category (empty means all) and go back to the first page.
    pub fn select_category<S: AsRef<str>>(&mut self, category: Option<S>) {
        self.category = normalize_category(category);
        self.page = 1;
    }

    /// Move to `requested`, clamped into `[1, total_pages]`. Returns the applied page.
    pub fn go_to_page(&mut self, requested: i64, total_pages: u32) -> u32 {
        self.page = clamp_page(requested, total_pages);
        self.page
    }

    /// Flip the signal breakdown. Returns the new value.
    pub fn toggle_signals(&mut self) -> bool {
        self.show_signals = !self.show_signals;
        self.show_signals
    }

    /// Selected user, falling back to the first user of `users`.
    pub fn effective_user_id<'a>(&'a self, users: Option<&'a [User]>) -> Option<&'a str> {
        self.selected_user_id
            .as_deref()
            .or_else(|| users.and_then(|u| u.first()).map(|u| u.id.as_str()))
    }

    /// Feed key for this selection, if a user is known.
    pub fn query_key(&self, users: Option<&[User]>, page_size: u32) -> Option<QueryKey> {
        self.effective_user_id(users)
            .map(|user_id| QueryKey::new(user_id, self.page, page_size, self.category.as_deref()))
    }
}
