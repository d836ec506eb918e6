//! View-model snapshots published by the controller.

use feed_cache::QueryState;
use feed_core::{total_pages, FeedError, FeedItem, FeedPage, QueryKey, User};

use crate::{Selection, UserList};

/// Banner text shown when either query has failed.
pub const LOAD_FAILURE_BANNER: &str = "Failed to load data.";

/// Coarse loading phase of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing to fetch (no user known yet, or nothing started).
    #[default]
    Idle,
    /// A query is running and there is nothing to show for it yet.
    Loading,
    /// A query is running while earlier or placeholder data stays visible.
    Refetching,
    /// Everything requested has settled.
    Ready,
}

impl LoadPhase {
    pub fn is_busy(self) -> bool {
        matches!(self, LoadPhase::Loading | LoadPhase::Refetching)
    }
}

/// Everything a renderer needs for one frame of the feed page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedViewModel {
    pub users: UserList,
    /// Effective user: the selected one, else the first listed.
    pub selected_user_id: Option<String>,
    pub category: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    pub total_pages: u32,
    pub items: Vec<FeedItem>,
    pub show_signals: bool,
    pub phase: LoadPhase,
    /// Feed items belong to the previous key while the current one loads.
    pub is_placeholder: bool,
    /// Nothing to show yet for a running query.
    pub is_loading: bool,
    /// Any query is running.
    pub is_fetching: bool,
    /// The feed query is running (initial load or background refetch).
    pub feed_fetching: bool,
    pub has_previous: bool,
    pub has_next: bool,
    /// [`LOAD_FAILURE_BANNER`] when either query failed.
    pub banner: Option<String>,
    pub users_error: Option<FeedError>,
    pub feed_error: Option<FeedError>,
    /// Key the current feed state belongs to.
    pub query_key: Option<QueryKey>,
}

impl Default for FeedViewModel {
    fn default() -> Self {
        Self::build(
            &Selection::default(),
            &QueryState::idle(),
            &QueryState::idle(),
            None,
            feed_core::DEFAULT_PAGE_SIZE,
        )
    }
}

impl FeedViewModel {
    /// Derive a snapshot from the selection and the two query states.
    pub fn build(
        selection: &Selection,
        users: &QueryState<UserList>,
        feed: &QueryState<FeedPage>,
        query_key: Option<&QueryKey>,
        page_size: u32,
    ) -> Self {
        let user_list = users.data.clone().unwrap_or_default();
        let selected_user_id = selection
            .effective_user_id(users.data.as_deref().map(Vec::as_slice))
            .map(str::to_string);

        let (items, total) = match &feed.data {
            Some(page) => (page.items.clone(), page.total),
            None => (Vec::new(), 0),
        };
        let pages = total_pages(total, page_size);
        let page = selection.page;

        let is_loading = users.is_loading() || feed.is_loading();
        let is_fetching = users.is_fetching || feed.is_fetching;
        let phase = if is_loading {
            LoadPhase::Loading
        } else if is_fetching {
            LoadPhase::Refetching
        } else if query_key.is_none() {
            LoadPhase::Idle
        } else {
            LoadPhase::Ready
        };

        Self {
            users: user_list,
            selected_user_id,
            category: selection.category.clone(),
            page,
            page_size,
            total,
            total_pages: pages,
            items,
            show_signals: selection.show_signals,
            phase,
            is_placeholder: feed.is_placeholder,
            is_loading,
            is_fetching,
            feed_fetching: feed.is_fetching,
            has_previous: page > 1,
            has_next: page < pages,
            banner: (users.error.is_some() || feed.error.is_some())
                .then(|| LOAD_FAILURE_BANNER.to_string()),
            users_error: users.error.clone(),
            feed_error: feed.error.clone(),
            query_key: query_key.cloned(),
        }
    }

    /// The effective user record, if loaded.
    pub fn selected_user(&self) -> Option<&User> {
        let id = self.selected_user_id.as_deref()?;
        self.users.iter().find(|u| u.id == id)
    }

    /// Show loading placeholders instead of cards.
    pub fn show_skeleton(&self) -> bool {
        self.phase == LoadPhase::Loading || (self.feed_fetching && self.items.is_empty())
    }

    /// Show the "no items" notice.
    pub fn show_empty_notice(&self) -> bool {
        !self.show_skeleton() && !self.feed_fetching && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use feed_cache::FetchStatus;
    use feed_core::Report;

    use super::*;

    fn item(id: &str) -> FeedItem {
        FeedItem {
            report: Report {
                id: id.to_string(),
                title: format!("Report {}", id),
                category: "Energy".to_string(),
                tags: vec![],
                published_at: "2024-03-01".to_string(),
            },
            score: 1.0,
            reason: "match".to_string(),
            why_it_matters: None,
            signals: Default::default(),
        }
    }

    fn resolved<V>(data: V) -> QueryState<V> {
        QueryState {
            data: Some(data),
            is_placeholder: false,
            status: FetchStatus::Resolved,
            is_fetching: false,
            error: None,
        }
    }

    fn key() -> QueryKey {
        QueryKey::new("u1", 1, 10, None::<&str>)
    }

    #[test]
    fn test_initial_view_is_idle() {
        let view = FeedViewModel::default();
        assert_eq!(view.phase, LoadPhase::Idle);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 1);
        assert!(!view.has_next && !view.has_previous);
        assert!(view.banner.is_none());
        assert!(view.show_empty_notice());
    }

    #[test]
    fn test_pagination_fields() {
        let mut selection = Selection::new();
        selection.page = 2;
        let feed = resolved(FeedPage {
            items: vec![item("r1")],
            total: 23,
        });
        let view = FeedViewModel::build(&selection, &resolved(Arc::new(vec![])), &feed, Some(&key()), 10);
        assert_eq!(view.total_pages, 3);
        assert!(view.has_previous);
        assert!(view.has_next);
        assert_eq!(view.phase, LoadPhase::Ready);
    }

    #[test]
    fn test_loading_versus_refetching() {
        let selection = Selection::new();
        let users = resolved(Arc::new(vec![]));

        let mut feed = QueryState::<FeedPage>::idle();
        feed.is_fetching = true;
        let view = FeedViewModel::build(&selection, &users, &feed, Some(&key()), 10);
        assert_eq!(view.phase, LoadPhase::Loading);
        assert!(view.show_skeleton());

        let mut feed = resolved(FeedPage {
            items: vec![item("r1")],
            total: 1,
        });
        feed.is_fetching = true;
        feed.is_placeholder = true;
        let view = FeedViewModel::build(&selection, &users, &feed, Some(&key()), 10);
        assert_eq!(view.phase, LoadPhase::Refetching);
        assert!(view.is_placeholder);
        assert!(!view.show_skeleton());
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_either_error_shows_banner() {
        let selection = Selection::new();
        let mut feed = QueryState::<FeedPage>::idle();
        feed.status = FetchStatus::Errored;
        feed.error = Some(FeedError::transport("down"));

        let view = FeedViewModel::build(&selection, &resolved(Arc::new(vec![])), &feed, Some(&key()), 10);
        assert_eq!(view.banner.as_deref(), Some(LOAD_FAILURE_BANNER));
        assert!(view.show_empty_notice());
    }
}
