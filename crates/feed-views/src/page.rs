//! Full feed page composition.

use feed_state::FeedViewModel;

use crate::sections::{
    render_banner, render_card, render_filters, render_header, render_pagination, render_skeleton,
};

/// Shown when the feed settled with nothing in it.
pub const EMPTY_NOTICE: &str = "No items found.";

const RULE: &str = "────────────────────────────────────────";

/// Feed body: skeleton, cards, or the empty notice.
pub fn render_feed_body(view: &FeedViewModel) -> String {
    if view.show_skeleton() {
        return render_skeleton();
    }
    if view.show_empty_notice() {
        return EMPTY_NOTICE.to_string();
    }
    view.items
        .iter()
        .map(|item| render_card(item, view.show_signals))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", RULE))
}

/// Render one frame of the feed page.
pub fn render_feed_page(view: &FeedViewModel) -> String {
    let mut blocks = vec![
        render_header(),
        render_filters(
            &view.users,
            view.selected_user_id.as_deref(),
            view.category.as_deref(),
            view.show_signals,
        ),
    ];
    if let Some(banner) = &view.banner {
        blocks.push(render_banner(banner));
    }
    blocks.push(render_feed_body(view));
    blocks.push(render_pagination(view.page, view.total_pages, view.total));

    blocks.join(&format!("\n\n{}\n\n", RULE))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use feed_cache::{FetchStatus, QueryState};
    use feed_core::{FeedError, FeedItem, FeedPage, QueryKey, Report, User};
    use feed_state::{LoadPhase, Selection};

    use super::*;

    fn item(id: &str) -> FeedItem {
        FeedItem {
            report: Report {
                id: id.into(),
                title: format!("Title {}", id),
                category: "Markets".into(),
                tags: vec![],
                published_at: "2024-05-20".into(),
            },
            score: 0.5,
            reason: "Recent".into(),
            why_it_matters: None,
            signals: Default::default(),
        }
    }

    fn users() -> QueryState<Arc<Vec<User>>> {
        QueryState {
            data: Some(Arc::new(vec![User {
                id: "u1".into(),
                name: "Dana".into(),
                role: "Analyst".into(),
                focus_categories: vec![],
                focus_tags: vec![],
            }])),
            is_placeholder: false,
            status: FetchStatus::Resolved,
            is_fetching: false,
            error: None,
        }
    }

    fn feed(items: Vec<FeedItem>, total: u32) -> QueryState<FeedPage> {
        QueryState {
            data: Some(FeedPage { items, total }),
            is_placeholder: false,
            status: FetchStatus::Resolved,
            is_fetching: false,
            error: None,
        }
    }

    fn view(feed: &QueryState<FeedPage>) -> FeedViewModel {
        let key = QueryKey::new("u1", 1, 10, None::<&str>);
        FeedViewModel::build(&Selection::new(), &users(), feed, Some(&key), 10)
    }

    #[test]
    fn test_page_with_items() {
        let page = render_feed_page(&view(&feed(vec![item("a"), item("b")], 12)));
        assert!(page.starts_with("Personalized Feed"));
        assert!(page.contains("User: Dana — Analyst"));
        assert!(page.contains("Title a"));
        assert!(page.contains("Title b"));
        assert!(page.contains("Page 1 of 2 (12 items)"));
        assert!(!page.contains(EMPTY_NOTICE));
        assert!(!page.contains("Failed to load data."));
    }

    #[test]
    fn test_page_empty_feed() {
        let page = render_feed_page(&view(&feed(vec![], 0)));
        assert!(page.contains(EMPTY_NOTICE));
        assert!(page.contains("Page 1 of 1 (0 items)"));
    }

    #[test]
    fn test_page_loading_shows_skeleton() {
        let mut loading = QueryState::<FeedPage>::idle();
        loading.is_fetching = true;
        let view = view(&loading);
        assert_eq!(view.phase, LoadPhase::Loading);

        let body = render_feed_body(&view);
        assert!(body.starts_with('░'));
        assert!(!body.contains(EMPTY_NOTICE));
    }

    #[test]
    fn test_page_failure_banner() {
        let mut failed = QueryState::<FeedPage>::idle();
        failed.status = FetchStatus::Errored;
        failed.error = Some(FeedError::transport("down"));
        let page = render_feed_page(&view(&failed));
        assert!(page.contains("! Failed to load data."));
        assert!(page.contains("User: Dana — Analyst"));
    }
}
