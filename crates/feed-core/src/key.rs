//! Query key composition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a category filter value.
///
/// Empty and whitespace-only categories mean "all categories" and collapse to `None`.
pub fn normalize_category<S: AsRef<str>>(category: Option<S>) -> Option<String> {
    category
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Key identifying one page of one user's feed.
///
/// Two keys are equal iff user, page, page size and category are all equal.
/// Fields are private so the page floor and category normalization always hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    user_id: String,
    page: u32,
    page_size: u32,
    category: Option<String>,
}

impl QueryKey {
    /// Create a key. `page` is floored at 1 and `page_size` at 1.
    pub fn new<S: AsRef<str>>(
        user_id: impl Into<String>,
        page: u32,
        page_size: u32,
        category: Option<S>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            page: page.max(1),
            page_size: page_size.max(1),
            category: normalize_category(category),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Query-string pairs for the feed endpoint. `category` is omitted when unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("user_id", self.user_id.clone()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feed:{}:{}:{}:{}",
            self.user_id,
            self.page,
            self.page_size,
            self.category.as_deref().unwrap_or("all")
        )
    }
}

/// Key of the user list. There is exactly one user list per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UsersKey;

impl fmt::Display for UsersKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "users")
    }
}
